use crate::repository;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub message: &'static str,
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<repository::User> for AuthUser {
    fn from(value: repository::User) -> Self {
        Self {
            id: value.id.to_hex(),
            name: value.name,
            email: value.email,
            role: value.role,
        }
    }
}
