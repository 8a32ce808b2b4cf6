use super::{
    dto::User,
    entity::{UserFindEntity, UserInsertEntity},
    Error, UsersRepository,
};
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use std::sync::Arc;
use time::OffsetDateTime;

const USERS: &str = "users";
const INDEX_NAME_UNIQUE_EMAIL: &str = "unique_index_email";

pub struct UsersRepositoryImpl {
    database: Database,
}

impl UsersRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        database.create_collection(USERS).await?;

        let collection = database.collection(USERS);
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_UNIQUE_EMAIL.to_string()) {
            Self::create_unique_email_index(&collection).await?;
            tracing::debug!("created index {USERS}.{INDEX_NAME_UNIQUE_EMAIL}");
        }

        Ok(Self { database })
    }

    async fn create_unique_email_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "email": 1,
            })
            .options(
                IndexOptions::builder()
                    .name(INDEX_NAME_UNIQUE_EMAIL.to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }
}

#[async_trait]
impl UsersRepository for UsersRepositoryImpl {
    async fn insert(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: String,
        created_at: OffsetDateTime,
    ) -> Result<User, Error> {
        let insert_entity = UserInsertEntity {
            name: &name,
            email: &email,
            password: &password_hash,
            role: &role,
            is_active: true,
            created_at: DateTime::from(created_at),
        };

        let insert_result = self
            .database
            .collection::<UserInsertEntity>(USERS)
            .insert_one(&insert_entity)
            .await
            .map_err(|err| {
                let ErrorKind::Write(ref write_failure) = *err.kind else {
                    return Error::Mongo(err);
                };

                let WriteFailure::WriteError(write_error) = write_failure else {
                    return Error::Mongo(err);
                };

                const DUPLICATE_KEY_CODE: i32 = 11000;
                match write_error.code == DUPLICATE_KEY_CODE {
                    true => Error::InsertUniqueViolation,
                    false => Error::Mongo(err),
                }
            })?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(User {
            id,
            name,
            email,
            password: password_hash,
            role,
            is_active: true,
            otp_code: None,
            otp_expires_at: None,
            created_at,
        })
    }

    async fn find(&self, id: ObjectId) -> Result<Option<User>, Error> {
        let entity = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find_one(doc! { "_id": id })
            .await?;

        Ok(entity.map(User::from))
    }

    async fn find_by_email(&self, email: String) -> Result<Option<User>, Error> {
        let entity = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find_one(doc! { "email": email })
            .await?;

        Ok(entity.map(User::from))
    }

    async fn update_otp(
        &self,
        id: ObjectId,
        otp_code: String,
        otp_expires_at: OffsetDateTime,
    ) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "otp_code": otp_code,
                        "otp_expires_at": DateTime::from(otp_expires_at),
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn clear_otp(&self, id: ObjectId) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$unset": {
                        "otp_code": "",
                        "otp_expires_at": "",
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn update_password(&self, id: ObjectId, password_hash: String) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "password": password_hash } },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}
