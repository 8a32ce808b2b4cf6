use super::EventsService;
use crate::{
    dto::{input, output},
    error::Error,
    repository::{self, EventsRepository, NewEvent},
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use time::OffsetDateTime;

pub struct EventsServiceImpl {
    repository: Arc<dyn EventsRepository>,
}

impl EventsServiceImpl {
    pub fn new(repository: Arc<dyn EventsRepository>) -> Self {
        Self { repository }
    }

    fn validate_event(event: &input::Event) -> Result<(), Error> {
        if event.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty"));
        }
        if event.category.trim().is_empty() {
            return Err(Error::Validation("category must not be empty"));
        }
        if event.venue.trim().is_empty() {
            return Err(Error::Validation("venue must not be empty"));
        }
        if event.ticket_price < 0 {
            return Err(Error::Validation("ticket price must not be negative"));
        }

        Ok(())
    }
}

#[async_trait]
impl EventsService for EventsServiceImpl {
    async fn create_event(
        &self,
        created_by: ObjectId,
        event: input::Event,
    ) -> Result<output::Event, Error> {
        tracing::info!("creating event");
        tracing::trace!(?event);

        Self::validate_event(&event)?;

        let event = self
            .repository
            .insert(NewEvent {
                title: event.title,
                description: event.description,
                category: event.category,
                venue: event.venue,
                date: event.date,
                time: event.time,
                ticket_price: event.ticket_price,
                image_url: event.image_url,
                is_active: true,
                created_by,
                created_at: OffsetDateTime::now_utc(),
            })
            .await?;

        tracing::info!(id = %event.id, "created event");

        Ok(event.into())
    }

    async fn update_event(
        &self,
        id: ObjectId,
        event: input::Event,
    ) -> Result<output::Event, Error> {
        tracing::info!("updating event");
        tracing::trace!(?event);

        Self::validate_event(&event)?;

        let update_result = self
            .repository
            .update(
                id,
                event.title,
                event.description,
                event.category,
                event.venue,
                event.date,
                event.time,
                event.ticket_price,
                event.image_url,
            )
            .await;

        match update_result {
            Ok(event) => {
                tracing::info!("updated event");
                Ok(event.into())
            }
            Err(repository::Error::NoDocumentUpdated) => Err(Error::EventNotExist),
            Err(err) => Err(Error::Database(err)),
        }
    }

    async fn update_event_is_active(
        &self,
        id: ObjectId,
        is_active: bool,
    ) -> Result<output::Event, Error> {
        tracing::info!(is_active, "updating event is_active");

        let update_result = self.repository.update_is_active(id, is_active).await;

        match update_result {
            Ok(event) => {
                tracing::info!("updated event is_active");
                Ok(event.into())
            }
            Err(repository::Error::NoDocumentUpdated) => Err(Error::EventNotExist),
            Err(err) => Err(Error::Database(err)),
        }
    }

    async fn delete_event(&self, id: ObjectId) -> Result<(), Error> {
        tracing::info!("deleting event");

        self.repository.delete(id).await.map_err(|err| match err {
            repository::Error::NoDocumentUpdated => Error::EventNotExist,
            err => Error::Database(err),
        })?;

        tracing::info!("deleted event");

        Ok(())
    }

    async fn find_event(&self, id: ObjectId) -> Result<output::Event, Error> {
        tracing::info!("finding event");

        let event = self
            .repository
            .find(id)
            .await?
            .ok_or(Error::EventNotExist)?;

        tracing::info!("found event");

        Ok(event.into())
    }

    async fn find_active_events(
        &self,
        category: Option<String>,
    ) -> Result<Vec<output::Event>, Error> {
        tracing::info!("finding active events");
        tracing::trace!(?category);

        let events = self.repository.find_many_active(category).await?;
        tracing::info!(count = events.len(), "found events");

        Ok(events.into_iter().map(output::Event::from).collect())
    }

    async fn find_all_events(&self) -> Result<Vec<output::Event>, Error> {
        tracing::info!("finding all events");

        let events = self.repository.find_many_all().await?;
        tracing::info!(count = events.len(), "found events");

        Ok(events.into_iter().map(output::Event::from).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repository::MockEventsRepository;
    use time::macros::datetime;

    fn event_input() -> input::Event {
        input::Event {
            title: "Summer Music Festival".to_string(),
            description: "Three stages, one night".to_string(),
            category: "Music".to_string(),
            venue: "Riverside Park".to_string(),
            date: datetime!(2026-09-18 00:00 UTC),
            time: "18:00".to_string(),
            ticket_price: 150,
            image_url: None,
        }
    }

    fn event_record(event: &input::Event, created_by: ObjectId) -> repository::Event {
        repository::Event {
            id: ObjectId::new(),
            title: event.title.clone(),
            description: event.description.clone(),
            category: event.category.clone(),
            venue: event.venue.clone(),
            date: event.date,
            time: event.time.clone(),
            ticket_price: event.ticket_price,
            image_url: event.image_url.clone(),
            is_active: true,
            created_by,
            created_at: datetime!(2026-01-01 12:00 UTC),
        }
    }

    #[tokio::test]
    async fn create_event_ok() {
        let created_by = ObjectId::new();
        let mut repository = MockEventsRepository::new();
        repository.expect_insert().return_once(move |new_event| {
            assert!(new_event.is_active);
            Ok(repository::Event {
                id: ObjectId::new(),
                title: new_event.title,
                description: new_event.description,
                category: new_event.category,
                venue: new_event.venue,
                date: new_event.date,
                time: new_event.time,
                ticket_price: new_event.ticket_price,
                image_url: new_event.image_url,
                is_active: new_event.is_active,
                created_by: new_event.created_by,
                created_at: new_event.created_at,
            })
        });
        let service = EventsServiceImpl::new(Arc::new(repository));

        let event = service.create_event(created_by, event_input()).await.unwrap();

        assert_eq!(event.title, "Summer Music Festival");
        assert!(event.is_active);
    }

    #[tokio::test]
    async fn create_event_empty_title_validation_err() {
        let mut repository = MockEventsRepository::new();
        repository.expect_insert().never();
        let service = EventsServiceImpl::new(Arc::new(repository));

        let mut event = event_input();
        event.title = "   ".to_string();

        let create_result = service.create_event(ObjectId::new(), event).await;

        assert!(matches!(create_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_event_negative_price_validation_err() {
        let mut repository = MockEventsRepository::new();
        repository.expect_insert().never();
        let service = EventsServiceImpl::new(Arc::new(repository));

        let mut event = event_input();
        event.ticket_price = -1;

        let create_result = service.create_event(ObjectId::new(), event).await;

        assert!(matches!(create_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn update_event_not_exist() {
        let mut repository = MockEventsRepository::new();
        repository
            .expect_update()
            .returning(|_, _, _, _, _, _, _, _, _| Err(repository::Error::NoDocumentUpdated));
        let service = EventsServiceImpl::new(Arc::new(repository));

        let update_result = service.update_event(ObjectId::new(), event_input()).await;

        assert!(matches!(update_result, Err(Error::EventNotExist)));
    }

    #[tokio::test]
    async fn update_event_is_active_not_exist() {
        let mut repository = MockEventsRepository::new();
        repository
            .expect_update_is_active()
            .returning(|_, _| Err(repository::Error::NoDocumentUpdated));
        let service = EventsServiceImpl::new(Arc::new(repository));

        let update_result = service.update_event_is_active(ObjectId::new(), false).await;

        assert!(matches!(update_result, Err(Error::EventNotExist)));
    }

    #[tokio::test]
    async fn delete_event_not_exist() {
        let mut repository = MockEventsRepository::new();
        repository
            .expect_delete()
            .returning(|_| Err(repository::Error::NoDocumentUpdated));
        let service = EventsServiceImpl::new(Arc::new(repository));

        let delete_result = service.delete_event(ObjectId::new()).await;

        assert!(matches!(delete_result, Err(Error::EventNotExist)));
    }

    #[tokio::test]
    async fn find_event_not_exist() {
        let mut repository = MockEventsRepository::new();
        repository.expect_find().returning(|_| Ok(None));
        let service = EventsServiceImpl::new(Arc::new(repository));

        let find_result = service.find_event(ObjectId::new()).await;

        assert!(matches!(find_result, Err(Error::EventNotExist)));
    }

    #[tokio::test]
    async fn find_active_events_category_passed_to_repository() {
        let mut repository = MockEventsRepository::new();
        repository
            .expect_find_many_active()
            .withf(|category| category.as_deref() == Some("Music"))
            .returning(|_| Ok(vec![]));
        let service = EventsServiceImpl::new(Arc::new(repository));

        let events = service
            .find_active_events(Some("Music".to_string()))
            .await
            .unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn find_all_events_maps_output() {
        let created_by = ObjectId::new();
        let input = event_input();
        let record = event_record(&input, created_by);
        let record_id = record.id;
        let mut repository = MockEventsRepository::new();
        repository
            .expect_find_many_all()
            .return_once(move || Ok(vec![record]));
        let service = EventsServiceImpl::new(Arc::new(repository));

        let events = service.find_all_events().await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, record_id.to_hex());
    }
}
