use super::EventSummary;
use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub event: EventSummary,
    pub tickets: i64,
    pub total_amount: i64,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Booking {
    pub fn from_parts(booking: repository::Booking, event: &repository::Event) -> Self {
        Self {
            id: booking.id.to_hex(),
            event: EventSummary::from(event),
            tickets: booking.tickets,
            total_amount: booking.total_amount,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}
