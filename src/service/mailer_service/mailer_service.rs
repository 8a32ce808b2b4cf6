use super::DeliveryError;
use axum::async_trait;

///
/// Outgoing transactional message attachment.
///
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub mime_type: String,
}

///
/// Transport for transactional messages. Content is assembled by the
/// caller; the mailer only delivers it. There is no retry, a failed
/// delivery is reported and the caller decides whether it is fatal.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailerService: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
        attachments: Vec<EmailAttachment>,
    ) -> Result<(), DeliveryError>;
}
