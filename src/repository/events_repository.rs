use super::{
    dto::{Event, NewEvent},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsRepository: Send + Sync {
    ///
    /// Inserts new event and returns it with its assigned id.
    ///
    async fn insert(&self, event: NewEvent) -> Result<Event, Error>;

    ///
    /// Inserts many events at once. Used by seeding only.
    ///
    async fn insert_many(&self, events: Vec<NewEvent>) -> Result<(), Error>;

    async fn find(&self, id: ObjectId) -> Result<Option<Event>, Error>;

    ///
    /// Finds active events, optionally narrowed to a single category.
    ///
    async fn find_many_active(&self, category: Option<String>) -> Result<Vec<Event>, Error>;

    ///
    /// Finds all events, including inactive ones.
    ///
    async fn find_many_all(&self) -> Result<Vec<Event>, Error>;

    async fn find_many_by_ids(&self, ids: Vec<ObjectId>) -> Result<Vec<Event>, Error>;

    ///
    /// Distinct categories of the given events.
    ///
    async fn find_categories(&self, ids: Vec<ObjectId>) -> Result<Vec<String>, Error>;

    ///
    /// Finds active events in any of the given categories, scheduled at or
    /// after `from`, excluding `exclude_ids`. Sorted ascending by date.
    ///
    async fn find_upcoming_in_categories(
        &self,
        categories: Vec<String>,
        exclude_ids: Vec<ObjectId>,
        from: OffsetDateTime,
        limit: i64,
    ) -> Result<Vec<Event>, Error>;

    ///
    /// Updates event fields. Image url is left untouched when not provided.
    /// Returns the updated event.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when event does not exist
    ///
    async fn update(
        &self,
        id: ObjectId,
        title: String,
        description: String,
        category: String,
        venue: String,
        date: OffsetDateTime,
        time: String,
        ticket_price: i64,
        image_url: Option<String>,
    ) -> Result<Event, Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when event does not exist
    ///
    async fn update_is_active(&self, id: ObjectId, is_active: bool) -> Result<Event, Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when event does not exist
    ///
    async fn delete(&self, id: ObjectId) -> Result<(), Error>;
}
