use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time: String,
    pub ticket_price: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIsActive {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct EventFilters {
    pub category: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn event_json_deserialize_ok() {
        let json = r#"{
            "title": "Summer Music Festival",
            "description": "Three stages, one night",
            "category": "Music",
            "venue": "Riverside Park",
            "date": "2026-09-18T00:00:00Z",
            "time": "18:00",
            "ticketPrice": 150,
            "imageUrl": "/api/uploads/image-123.png"
        }"#;

        let event = serde_json::from_str::<Event>(json).unwrap();

        assert_eq!(event.title, "Summer Music Festival");
        assert_eq!(event.ticket_price, 150);
        assert_eq!(event.image_url.as_deref(), Some("/api/uploads/image-123.png"));
    }

    #[test]
    fn event_json_deserialize_image_url_missing() {
        let json = r#"{
            "title": "Summer Music Festival",
            "description": "Three stages, one night",
            "category": "Music",
            "venue": "Riverside Park",
            "date": "2026-09-18T00:00:00Z",
            "time": "18:00",
            "ticketPrice": 150
        }"#;

        let event = serde_json::from_str::<Event>(json).unwrap();

        assert!(event.image_url.is_none());
    }
}
