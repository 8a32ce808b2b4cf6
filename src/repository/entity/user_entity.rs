use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct UserInsertEntity<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub is_active: bool,
    pub created_at: DateTime,
}

#[derive(Deserialize)]
pub struct UserFindEntity {
    pub _id: ObjectId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_active: bool,
    #[serde(default)]
    pub otp_code: Option<String>,
    #[serde(default)]
    pub otp_expires_at: Option<DateTime>,
    pub created_at: DateTime,
}
