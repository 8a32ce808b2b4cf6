use super::{
    dto::Booking,
    entity::{BookingFindEntity, BookingInsertEntity},
    BookingsRepository, Error,
};
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{error::ErrorKind, Collection, Database, IndexModel};
use std::sync::Arc;
use time::OffsetDateTime;

const BOOKINGS: &str = "bookings";
const INDEX_NAME_USER_ID: &str = "index_user_id";

const STATUS_CONFIRMED: &str = "confirmed";

pub struct BookingsRepositoryImpl {
    database: Database,
}

impl BookingsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        database.create_collection(BOOKINGS).await?;

        let collection = database.collection(BOOKINGS);
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_USER_ID.to_string()) {
            Self::create_user_id_index(&collection).await?;
            tracing::debug!("created index {BOOKINGS}.{INDEX_NAME_USER_ID}");
        }

        Ok(Self { database })
    }

    async fn create_user_id_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "user_id": 1,
            })
            .options(
                mongodb::options::IndexOptions::builder()
                    .name(INDEX_NAME_USER_ID.to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }
}

#[async_trait]
impl BookingsRepository for BookingsRepositoryImpl {
    async fn insert(
        &self,
        user_id: ObjectId,
        event_id: ObjectId,
        tickets: i64,
        total_amount: i64,
        created_at: OffsetDateTime,
    ) -> Result<Booking, Error> {
        let insert_entity = BookingInsertEntity {
            user_id,
            event_id,
            tickets,
            total_amount,
            status: STATUS_CONFIRMED.to_string(),
            created_at: DateTime::from(created_at),
        };

        let insert_result = self
            .database
            .collection::<BookingInsertEntity>(BOOKINGS)
            .insert_one(&insert_entity)
            .await?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(Booking {
            id,
            user_id,
            event_id,
            tickets,
            total_amount,
            status: insert_entity.status,
            created_at,
        })
    }

    async fn find(&self, id: ObjectId, user_id: ObjectId) -> Result<Option<Booking>, Error> {
        let entity = self
            .database
            .collection::<BookingFindEntity>(BOOKINGS)
            .find_one(doc! {
                "_id": id,
                "user_id": user_id,
            })
            .await?;

        Ok(entity.map(Booking::from))
    }

    async fn find_many(&self, user_id: ObjectId) -> Result<Vec<Booking>, Error> {
        let entities = self
            .database
            .collection::<BookingFindEntity>(BOOKINGS)
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(entities.into_iter().map(Booking::from).collect())
    }
}
