use bson::oid::ObjectId;
use time::OffsetDateTime;

///
/// Event fields as they are written on insert.
/// Seeding and the events service both build this.
///
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    pub date: OffsetDateTime,
    pub time: String,
    pub ticket_price: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_by: ObjectId,
    pub created_at: OffsetDateTime,
}
