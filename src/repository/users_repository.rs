use super::{dto::User, error::Error};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    ///
    /// Inserts new user.
    ///
    /// ### Errors
    /// - [Error::InsertUniqueViolation] when email is already taken
    ///
    async fn insert(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: String,
        created_at: OffsetDateTime,
    ) -> Result<User, Error>;

    async fn find(&self, id: ObjectId) -> Result<Option<User>, Error>;

    async fn find_by_email(&self, email: String) -> Result<Option<User>, Error>;

    ///
    /// Stores one-time code used to reset the password.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when user does not exist
    ///
    async fn update_otp(
        &self,
        id: ObjectId,
        otp_code: String,
        otp_expires_at: OffsetDateTime,
    ) -> Result<(), Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when user does not exist
    ///
    async fn clear_otp(&self, id: ObjectId) -> Result<(), Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when user does not exist
    ///
    async fn update_password(&self, id: ObjectId, password_hash: String) -> Result<(), Error>;
}
