use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsService: Send + Sync {
    async fn create_event(
        &self,
        created_by: ObjectId,
        event: input::Event,
    ) -> Result<output::Event, Error>;

    async fn update_event(&self, id: ObjectId, event: input::Event)
        -> Result<output::Event, Error>;

    ///
    /// Soft-hides or restores the event in the public listing.
    /// Existing bookings are unaffected.
    ///
    async fn update_event_is_active(
        &self,
        id: ObjectId,
        is_active: bool,
    ) -> Result<output::Event, Error>;

    async fn delete_event(&self, id: ObjectId) -> Result<(), Error>;

    async fn find_event(&self, id: ObjectId) -> Result<output::Event, Error>;

    ///
    /// Public catalog: active events only, optionally narrowed to a category.
    ///
    async fn find_active_events(
        &self,
        category: Option<String>,
    ) -> Result<Vec<output::Event>, Error>;

    ///
    /// Admin catalog: every event, including inactive ones.
    ///
    async fn find_all_events(&self) -> Result<Vec<output::Event>, Error>;
}
