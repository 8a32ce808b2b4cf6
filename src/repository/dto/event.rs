use crate::repository::entity::EventFindEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;

pub struct Event {
    pub id: ObjectId,
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

impl From<EventFindEntity> for Event {
    fn from(value: EventFindEntity) -> Self {
        Self {
            id: value._id,
            title: value.title,
            description: value.description,
            category: value.category,
            venue: value.venue,
            date: value.date.into(),
            time: value.time,
            ticket_price: value.ticket_price,
            image_url: value.image_url,
            is_active: value.is_active,
            created_by: value.created_by,
            created_at: value.created_at.into(),
        }
    }
}
