use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;

pub struct BookingsServiceConfig {
    ///
    /// Optional cap on tickets per booking. None means unlimited,
    /// which matches the catalog having no seat inventory at all.
    ///
    pub max_tickets_per_booking: Option<u32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingsService: Send + Sync {
    ///
    /// Books tickets for an event.
    ///
    /// The booking row is the durability checkpoint: once it is written
    /// the operation reports success, even if rendering the e-ticket or
    /// delivering the confirmation mail fails afterwards. Those failures
    /// are logged as warnings and the ticket stays downloadable.
    ///
    /// ### Errors
    /// - [Error::Validation] when tickets is zero or over the configured cap
    /// - [Error::EventNotExist] when the event id does not resolve
    ///
    async fn create_booking(
        &self,
        user_id: ObjectId,
        booking: input::Booking,
    ) -> Result<output::Booking, Error>;

    ///
    /// Finds all bookings of the user, newest first,
    /// each with its event summary.
    ///
    async fn find_user_bookings(&self, user_id: ObjectId)
        -> Result<Vec<output::Booking>, Error>;

    ///
    /// Re-renders the e-ticket of an owned booking. Nothing is cached;
    /// every download is rendered fresh from the current records.
    ///
    /// ### Errors
    /// - [Error::BookingNotExist] when the booking does not exist
    /// or belongs to another user
    ///
    async fn download_eticket(
        &self,
        id: ObjectId,
        user_id: ObjectId,
    ) -> Result<output::ETicket, Error>;
}
