use super::{
    dto::{Event, NewEvent},
    entity::{EventFindEntity, EventInsertEntity},
    Error, EventsRepository,
};
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{error::ErrorKind, options::ReturnDocument, Collection, Database, IndexModel};
use std::sync::Arc;
use time::OffsetDateTime;

const EVENTS: &str = "events";
const INDEX_NAME_CATEGORY_DATE: &str = "index_category_date";

pub struct EventsRepositoryImpl {
    database: Database,
}

impl EventsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        database.create_collection(EVENTS).await?;

        let collection = database.collection(EVENTS);
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_CATEGORY_DATE.to_string()) {
            Self::create_category_date_index(&collection).await?;
            tracing::debug!("created index {EVENTS}.{INDEX_NAME_CATEGORY_DATE}");
        }

        Ok(Self { database })
    }

    async fn create_category_date_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "category": 1,
                "date": 1,
            })
            .options(
                mongodb::options::IndexOptions::builder()
                    .name(INDEX_NAME_CATEGORY_DATE.to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }

    fn insert_entity(event: NewEvent) -> EventInsertEntity {
        EventInsertEntity {
            title: event.title,
            description: event.description,
            category: event.category,
            venue: event.venue,
            date: DateTime::from(event.date),
            time: event.time,
            ticket_price: event.ticket_price,
            image_url: event.image_url,
            is_active: event.is_active,
            created_by: event.created_by,
            created_at: DateTime::from(event.created_at),
        }
    }

    fn entity_to_event(id: ObjectId, entity: EventInsertEntity) -> Event {
        Event {
            id,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            venue: entity.venue,
            date: entity.date.into(),
            time: entity.time,
            ticket_price: entity.ticket_price,
            image_url: entity.image_url,
            is_active: entity.is_active,
            created_by: entity.created_by,
            created_at: entity.created_at.into(),
        }
    }
}

#[async_trait]
impl EventsRepository for EventsRepositoryImpl {
    async fn insert(&self, event: NewEvent) -> Result<Event, Error> {
        let insert_entity = Self::insert_entity(event);

        let insert_result = self
            .database
            .collection::<EventInsertEntity>(EVENTS)
            .insert_one(&insert_entity)
            .await?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(Self::entity_to_event(id, insert_entity))
    }

    async fn insert_many(&self, events: Vec<NewEvent>) -> Result<(), Error> {
        let insert_entities = events
            .into_iter()
            .map(Self::insert_entity)
            .collect::<Vec<_>>();

        self.database
            .collection::<EventInsertEntity>(EVENTS)
            .insert_many(&insert_entities)
            .await?;

        Ok(())
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Event>, Error> {
        let entity = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find_one(doc! { "_id": id })
            .await?;

        Ok(entity.map(Event::from))
    }

    async fn find_many_active(&self, category: Option<String>) -> Result<Vec<Event>, Error> {
        let mut filter = doc! { "is_active": true };
        if let Some(category) = category {
            filter.insert("category", category);
        }

        let entities = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find(filter)
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(entities.into_iter().map(Event::from).collect())
    }

    async fn find_many_all(&self) -> Result<Vec<Event>, Error> {
        let entities = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find(doc! {})
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(entities.into_iter().map(Event::from).collect())
    }

    async fn find_many_by_ids(&self, ids: Vec<ObjectId>) -> Result<Vec<Event>, Error> {
        let entities = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find(doc! { "_id": { "$in": ids } })
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(entities.into_iter().map(Event::from).collect())
    }

    async fn find_categories(&self, ids: Vec<ObjectId>) -> Result<Vec<String>, Error> {
        let categories = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .distinct("category", doc! { "_id": { "$in": ids } })
            .await?;

        let categories = categories
            .into_iter()
            .filter_map(|category| match category {
                Bson::String(category) => Some(category),
                _ => None,
            })
            .collect();

        Ok(categories)
    }

    async fn find_upcoming_in_categories(
        &self,
        categories: Vec<String>,
        exclude_ids: Vec<ObjectId>,
        from: OffsetDateTime,
        limit: i64,
    ) -> Result<Vec<Event>, Error> {
        let entities = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find(doc! {
                "category": { "$in": categories },
                "_id": { "$nin": exclude_ids },
                "is_active": true,
                "date": { "$gte": DateTime::from(from) },
            })
            .sort(doc! { "date": 1 })
            .limit(limit)
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(entities.into_iter().map(Event::from).collect())
    }

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
    ) -> Result<Event, Error> {
        let mut set = doc! {
            "title": title,
            "description": description,
            "category": category,
            "venue": venue,
            "date": DateTime::from(date),
            "time": time,
            "ticket_price": ticket_price,
        };
        if let Some(image_url) = image_url {
            set.insert("image_url", image_url);
        }

        let entity = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        entity.map(Event::from).ok_or(Error::NoDocumentUpdated)
    }

    async fn update_is_active(&self, id: ObjectId, is_active: bool) -> Result<Event, Error> {
        let entity = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "is_active": is_active } })
            .return_document(ReturnDocument::After)
            .await?;

        entity.map(Event::from).ok_or(Error::NoDocumentUpdated)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), Error> {
        let delete_result = self
            .database
            .collection::<Document>(EVENTS)
            .delete_one(doc! { "_id": id })
            .await?;

        match delete_result.deleted_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}
