use super::{dto::Booking, error::Error};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingsRepository: Send + Sync {
    ///
    /// Inserts new booking with the confirmed status
    /// and returns it with its assigned id.
    ///
    async fn insert(
        &self,
        user_id: ObjectId,
        event_id: ObjectId,
        tickets: i64,
        total_amount: i64,
        created_at: OffsetDateTime,
    ) -> Result<Booking, Error>;

    ///
    /// Finds one booking owned by the user.
    /// Ownership is part of the filter, so someone else's booking
    /// is indistinguishable from a missing one.
    ///
    async fn find(&self, id: ObjectId, user_id: ObjectId) -> Result<Option<Booking>, Error>;

    ///
    /// Finds all bookings of the user, sorted descending by creation date.
    ///
    async fn find_many(&self, user_id: ObjectId) -> Result<Vec<Booking>, Error>;
}
