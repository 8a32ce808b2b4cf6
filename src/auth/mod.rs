mod dto;
mod jwt_authorization_validator;
mod role;

pub use dto::{JwtClaims, User};
pub use jwt_authorization_validator::*;
pub use role::*;

use crate::error::Error;

///
/// Validates that user has the admin role.
///
/// ### Errors
/// - [Error::MissingRole] when user is not an admin
///
pub fn require_admin(user: &User) -> Result<(), Error> {
    match user.role == Role::Admin.as_ref() {
        true => Ok(()),
        false => Err(Error::MissingRole),
    }
}
