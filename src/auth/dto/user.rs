use bson::oid::ObjectId;
use std::{ops::Deref, sync::Arc};

///
/// Struct with user information.
///
/// To make sure cloning does not take too long
/// all fields are stored in InnerUser behind an Arc.
///
/// InnerUser fields are accessible thanks to Deref trait.
///
#[derive(Clone)]
pub struct User {
    inner: Arc<InnerUser>,
}

///
/// User information retrieved from his JWT.
///
pub struct InnerUser {
    pub id: ObjectId,
    pub role: String,
}

impl User {
    pub fn new(id: ObjectId, role: String) -> Self {
        Self {
            inner: Arc::new(InnerUser { id, role }),
        }
    }
}

impl Deref for User {
    type Target = InnerUser;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
