use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use jsonwebtoken::EncodingKey;
use std::time::Duration;

pub struct AccountsServiceConfig {
    pub jwt_encoding_key: EncodingKey,
    pub jwt_lifespan: Duration,
    pub otp_lifespan: Duration,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsService: Send + Sync {
    ///
    /// Creates account and returns a session token for it.
    /// A signup confirmation mail is sent best-effort; the account
    /// exists whether or not the mail goes out.
    ///
    /// ### Errors
    /// - [Error::UserAlreadyExists] when email is taken
    /// - [Error::Validation] on malformed name/email/password/role
    ///
    async fn signup(&self, signup: input::Signup) -> Result<output::AuthSession, Error>;

    ///
    /// ### Errors
    /// - [Error::InvalidCredentials] on unknown email or wrong password,
    /// indistinguishable from each other on purpose
    /// - [Error::AccountDeactivated] when the account was deactivated
    ///
    async fn login(&self, login: input::Login) -> Result<output::AuthSession, Error>;

    ///
    /// Stores a one-time code on the account and mails it.
    /// Delivery failure is fatal here; the caller must know
    /// the code never went out.
    ///
    /// ### Errors
    /// - [Error::UserNotExist] when email is unknown
    /// - [Error::Delivery] when the code could not be delivered
    ///
    async fn forgot_password(&self, request: input::ForgotPassword) -> Result<(), Error>;

    ///
    /// ### Errors
    /// - [Error::UserNotExist] when email is unknown
    /// - [Error::Validation] when the code is missing, expired or wrong
    ///
    async fn reset_password(&self, request: input::ResetPassword) -> Result<(), Error>;
}
