use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// event id as ObjectId hex
    pub event_id: String,
    pub tickets: u32,
}
