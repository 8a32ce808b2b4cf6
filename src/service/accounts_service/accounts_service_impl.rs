use super::{AccountsService, AccountsServiceConfig};
use crate::{
    auth::{JwtClaims, Role},
    dto::{input, output},
    error::Error,
    repository::{self, UsersRepository},
    service::mailer_service::MailerService,
};
use axum::async_trait;
use jsonwebtoken::Header;
use rand::Rng;
use std::sync::Arc;
use time::OffsetDateTime;

pub struct AccountsServiceImpl {
    config: AccountsServiceConfig,
    users_repository: Arc<dyn UsersRepository>,
    mailer_service: Arc<dyn MailerService>,
}

impl AccountsServiceImpl {
    pub fn new(
        config: AccountsServiceConfig,
        users_repository: Arc<dyn UsersRepository>,
        mailer_service: Arc<dyn MailerService>,
    ) -> Self {
        Self {
            config,
            users_repository,
            mailer_service,
        }
    }

    fn validate_signup(signup: &input::Signup) -> Result<(), Error> {
        if signup.name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty"));
        }
        if !signup.email.contains('@') {
            return Err(Error::Validation("email is not valid"));
        }
        Self::validate_password(&signup.password)?;
        if let Some(role) = &signup.role {
            if role != Role::User.as_ref() && role != Role::Admin.as_ref() {
                return Err(Error::Validation("role must be user or admin"));
            }
        }

        Ok(())
    }

    fn validate_password(password: &str) -> Result<(), Error> {
        // bcrypt ignores everything past 72 bytes
        if password.len() < 8 || password.len() > 72 {
            return Err(Error::Validation(
                "password must be between 8 and 72 characters",
            ));
        }

        Ok(())
    }

    async fn hash_password(password: String) -> Result<String, Error> {
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
                .await
                .map_err(anyhow::Error::from)?
                .map_err(anyhow::Error::from)?;

        Ok(password_hash)
    }

    async fn verify_password(password: String, password_hash: String) -> Result<bool, Error> {
        let password_matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
                .await
                .map_err(anyhow::Error::from)?
                .map_err(anyhow::Error::from)?;

        Ok(password_matches)
    }

    fn issue_token(&self, user: &repository::User) -> Result<String, Error> {
        let expire_at = OffsetDateTime::now_utc() + self.config.jwt_lifespan;
        let claims = JwtClaims {
            sub: user.id.to_hex(),
            exp: expire_at.unix_timestamp(),
            role: user.role.clone(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.config.jwt_encoding_key)
            .map_err(anyhow::Error::from)?;

        Ok(token)
    }

    async fn send_signup_confirmation(&self, user: &repository::User) {
        let text_body = format!(
            "Hi {},\n\nYour account is ready. You can now browse events and book tickets.\n\n\
             Regards,\nEvent Team",
            user.name
        );
        let html_body = format!(
            "<p>Hi {},</p><p>Your account is ready. You can now browse events and book \
             tickets.</p><p>Regards,<br/>Event Team</p>",
            user.name
        );

        let send_result = self
            .mailer_service
            .send(&user.email, "Welcome aboard", &text_body, &html_body, Vec::new())
            .await;
        if let Err(err) = send_result {
            tracing::warn!(%err, warning = "signup confirmation delivery failed, account kept");
        }
    }
}

#[async_trait]
impl AccountsService for AccountsServiceImpl {
    async fn signup(&self, signup: input::Signup) -> Result<output::AuthSession, Error> {
        tracing::info!("creating account");

        Self::validate_signup(&signup)?;

        let input::Signup {
            name,
            email,
            password,
            role,
        } = signup;
        let role = role.unwrap_or_else(|| Role::User.as_ref().to_string());

        let password_hash = Self::hash_password(password).await?;

        let user = self
            .users_repository
            .insert(name, email, password_hash, role, OffsetDateTime::now_utc())
            .await
            .map_err(|err| match err {
                repository::Error::InsertUniqueViolation => Error::UserAlreadyExists,
                err => Error::Database(err),
            })?;
        tracing::info!(id = %user.id, "created account");

        self.send_signup_confirmation(&user).await;

        let token = self.issue_token(&user)?;

        Ok(output::AuthSession {
            message: "User created successfully",
            token,
            user: user.into(),
        })
    }

    async fn login(&self, login: input::Login) -> Result<output::AuthSession, Error> {
        tracing::info!("logging in");

        let user = self
            .users_repository
            .find_by_email(login.email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        let password_matches =
            Self::verify_password(login.password, user.password.clone()).await?;
        if !password_matches {
            return Err(Error::InvalidCredentials);
        }

        if !user.is_active {
            return Err(Error::AccountDeactivated);
        }

        tracing::info!(id = %user.id, "logged in");

        let token = self.issue_token(&user)?;

        Ok(output::AuthSession {
            message: "Login successful",
            token,
            user: user.into(),
        })
    }

    async fn forgot_password(&self, request: input::ForgotPassword) -> Result<(), Error> {
        tracing::info!("requesting password reset code");

        let user = self
            .users_repository
            .find_by_email(request.email)
            .await?
            .ok_or(Error::UserNotExist)?;

        let otp_code = rand::thread_rng().gen_range(100_000..1_000_000).to_string();
        let expires_at = OffsetDateTime::now_utc() + self.config.otp_lifespan;

        self.users_repository
            .update_otp(user.id, otp_code.clone(), expires_at)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::UserNotExist,
                err => Error::Database(err),
            })?;

        let text_body = format!(
            "Hi {},\n\nYour password reset code is {otp_code}. It expires shortly.\n\n\
             If you didn't request this, you can safely ignore this message.\n\n\
             Regards,\nEvent Team",
            user.name
        );
        let html_body = format!(
            "<p>Hi {},</p><p>Your password reset code is <strong>{otp_code}</strong>. \
             It expires shortly.</p><p>If you didn't request this, you can safely ignore \
             this message.</p><p>Regards,<br/>Event Team</p>",
            user.name
        );

        // the whole point is getting the code to the user,
        // so a failed delivery fails the request
        self.mailer_service
            .send(
                &user.email,
                "Your password reset code",
                &text_body,
                &html_body,
                Vec::new(),
            )
            .await?;

        tracing::info!(id = %user.id, "sent password reset code");

        Ok(())
    }

    async fn reset_password(&self, request: input::ResetPassword) -> Result<(), Error> {
        tracing::info!("resetting password");

        let user = self
            .users_repository
            .find_by_email(request.email)
            .await?
            .ok_or(Error::UserNotExist)?;

        let otp_valid = matches!(
            (&user.otp_code, user.otp_expires_at),
            (Some(otp_code), Some(expires_at))
                if *otp_code == request.otp && expires_at > OffsetDateTime::now_utc()
        );
        if !otp_valid {
            return Err(Error::Validation("Invalid or expired OTP"));
        }

        Self::validate_password(&request.new_password)?;
        let password_hash = Self::hash_password(request.new_password).await?;

        self.users_repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::UserNotExist,
                err => Error::Database(err),
            })?;

        self.users_repository
            .clear_otp(user.id)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::UserNotExist,
                err => Error::Database(err),
            })?;

        tracing::info!(id = %user.id, "reset password");

        Ok(())
    }
}
