use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct JwtClaims {
    /// user id as ObjectId hex
    pub sub: String,
    pub exp: i64,
    pub role: String,
}
