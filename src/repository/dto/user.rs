use crate::repository::entity::UserFindEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;

pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_active: bool,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl From<UserFindEntity> for User {
    fn from(value: UserFindEntity) -> Self {
        Self {
            id: value._id,
            name: value.name,
            email: value.email,
            password: value.password,
            role: value.role,
            is_active: value.is_active,
            otp_code: value.otp_code,
            otp_expires_at: value.otp_expires_at.map(OffsetDateTime::from),
            created_at: value.created_at.into(),
        }
    }
}
