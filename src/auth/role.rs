//!
//! All roles used within application
//!

use strum::AsRefStr;

#[derive(AsRefStr)]
pub enum Role {
    #[strum(serialize = "admin")]
    Admin,

    #[strum(serialize = "user")]
    User,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn admin() {
        let role = Role::Admin.as_ref();
        assert_eq!(role, "admin");
    }

    #[test]
    fn user() {
        let role = Role::User.as_ref();
        assert_eq!(role, "user");
    }
}
