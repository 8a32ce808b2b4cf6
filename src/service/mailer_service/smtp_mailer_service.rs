use super::{DeliveryError, EmailAttachment, MailerService};
use axum::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use std::time::Duration;

pub struct SmtpMailerServiceConfig {
    pub relay: String,
    pub username: String,
    pub password: String,
    pub from: String,
    /// Upper bound on a single delivery attempt. Keeps a slow
    /// transport from hanging the request that triggered the mail.
    pub timeout: Duration,
}

pub struct SmtpMailerService {
    from: Mailbox,
    transport: SmtpTransport,
}

impl SmtpMailerService {
    pub fn new(config: SmtpMailerServiceConfig) -> anyhow::Result<Self> {
        let from = config.from.parse()?;

        let transport = SmtpTransport::relay(&config.relay)?
            .credentials(Credentials::new(config.username, config.password))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { from, transport })
    }
}

#[async_trait]
impl MailerService for SmtpMailerService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
        attachments: Vec<EmailAttachment>,
    ) -> Result<(), DeliveryError> {
        let mut multipart = MultiPart::mixed().multipart(MultiPart::alternative_plain_html(
            text_body.to_string(),
            html_body.to_string(),
        ));
        for attachment in attachments {
            let content_type = ContentType::parse(&attachment.mime_type)?;
            multipart = multipart
                .singlepart(Attachment::new(attachment.filename).body(attachment.content, content_type));
        }

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .multipart(multipart)?;

        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;

        Ok(())
    }
}
