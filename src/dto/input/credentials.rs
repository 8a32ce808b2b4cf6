use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPassword {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn signup_json_deserialize_role_missing() {
        let json = r#"{
            "name": "John Doe",
            "email": "john@example.com",
            "password": "password123"
        }"#;

        let signup = serde_json::from_str::<Signup>(json).unwrap();

        assert!(signup.role.is_none());
    }

    #[test]
    fn reset_password_json_deserialize_ok() {
        let json = r#"{
            "email": "john@example.com",
            "otp": "123456",
            "newPassword": "new password"
        }"#;

        let reset = serde_json::from_str::<ResetPassword>(json).unwrap();

        assert_eq!(reset.otp, "123456");
        assert_eq!(reset.new_password, "new password");
    }
}
