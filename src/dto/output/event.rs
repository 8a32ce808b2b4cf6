use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time: String,
    pub ticket_price: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<repository::Event> for Event {
    fn from(value: repository::Event) -> Self {
        Self {
            id: value.id.to_hex(),
            title: value.title,
            description: value.description,
            category: value.category,
            venue: value.venue,
            date: value.date,
            time: value.time,
            ticket_price: value.ticket_price,
            image_url: value.image_url,
            is_active: value.is_active,
            created_by: value.created_by.to_hex(),
            created_at: value.created_at,
        }
    }
}

///
/// Event fields shown next to a booking.
///
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub venue: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time: String,
    pub ticket_price: i64,
    pub image_url: Option<String>,
}

impl From<&repository::Event> for EventSummary {
    fn from(value: &repository::Event) -> Self {
        Self {
            id: value.id.to_hex(),
            title: value.title.clone(),
            venue: value.venue.clone(),
            date: value.date,
            time: value.time.clone(),
            ticket_price: value.ticket_price,
            image_url: value.image_url.clone(),
        }
    }
}
