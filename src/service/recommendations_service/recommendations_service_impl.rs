use super::RecommendationsService;
use crate::{
    dto::output,
    error::Error,
    repository::{BookingsRepository, EventsRepository},
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use time::OffsetDateTime;

const MAX_RECOMMENDATIONS: i64 = 5;

pub struct RecommendationsServiceImpl {
    events_repository: Arc<dyn EventsRepository>,
    bookings_repository: Arc<dyn BookingsRepository>,
}

impl RecommendationsServiceImpl {
    pub fn new(
        events_repository: Arc<dyn EventsRepository>,
        bookings_repository: Arc<dyn BookingsRepository>,
    ) -> Self {
        Self {
            events_repository,
            bookings_repository,
        }
    }
}

#[async_trait]
impl RecommendationsService for RecommendationsServiceImpl {
    async fn find_recommendations(
        &self,
        user_id: ObjectId,
    ) -> Result<Vec<output::Event>, Error> {
        tracing::info!("finding recommendations");

        let bookings = self.bookings_repository.find_many(user_id).await?;
        if bookings.is_empty() {
            tracing::info!("user has no bookings");
            return Ok(Vec::new());
        }

        let mut booked_event_ids = bookings
            .into_iter()
            .map(|booking| booking.event_id)
            .collect::<Vec<_>>();
        booked_event_ids.sort_unstable();
        booked_event_ids.dedup();

        let categories = self
            .events_repository
            .find_categories(booked_event_ids.clone())
            .await?;
        if categories.is_empty() {
            tracing::info!("booked events resolve to no categories");
            return Ok(Vec::new());
        }

        let events = self
            .events_repository
            .find_upcoming_in_categories(
                categories,
                booked_event_ids,
                OffsetDateTime::now_utc(),
                MAX_RECOMMENDATIONS,
            )
            .await?;
        tracing::info!(count = events.len(), "found recommendations");

        Ok(events.into_iter().map(output::Event::from).collect())
    }
}
