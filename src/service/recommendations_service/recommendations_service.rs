use crate::{dto::output, error::Error};
use axum::async_trait;
use bson::oid::ObjectId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationsService: Send + Sync {
    ///
    /// Suggests upcoming active events sharing a category with the
    /// user's booking history, excluding events already booked.
    /// Sorted ascending by date, at most five entries.
    ///
    /// A user without booking history gets an empty list;
    /// that is a valid outcome, not an error.
    ///
    async fn find_recommendations(&self, user_id: ObjectId)
        -> Result<Vec<output::Event>, Error>;
}
