use crate::repository::entity::BookingFindEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;

pub struct Booking {
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub event_id: ObjectId,
    pub tickets: i64,
    pub total_amount: i64,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl From<BookingFindEntity> for Booking {
    fn from(value: BookingFindEntity) -> Self {
        Self {
            id: value._id,
            user_id: value.user_id,
            event_id: value.event_id,
            tickets: value.tickets,
            total_amount: value.total_amount,
            status: value.status,
            created_at: value.created_at.into(),
        }
    }
}
