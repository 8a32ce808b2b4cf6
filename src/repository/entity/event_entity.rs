use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct EventInsertEntity {
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    pub date: DateTime,
    pub time: String,
    pub ticket_price: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_by: ObjectId,
    pub created_at: DateTime,
}

#[derive(Deserialize)]
pub struct EventFindEntity {
    pub _id: ObjectId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    pub date: DateTime,
    pub time: String,
    pub ticket_price: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_by: ObjectId,
    pub created_at: DateTime,
}
