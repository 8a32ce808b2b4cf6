use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct BookingInsertEntity {
    pub user_id: ObjectId,
    pub event_id: ObjectId,
    pub tickets: i64,
    pub total_amount: i64,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Deserialize)]
pub struct BookingFindEntity {
    pub _id: ObjectId,
    pub user_id: ObjectId,
    pub event_id: ObjectId,
    pub tickets: i64,
    pub total_amount: i64,
    pub status: String,
    pub created_at: DateTime,
}
