use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full user row. `password_hash` never leaves the backend; handlers return
/// `UserPublic` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String, // "user" or "admin"
    pub banned: bool,
}

/// Redacted version sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub banned: bool,
}

impl From<&User> for UserPublic {
    fn from(u: &User) -> Self {
        UserPublic {
            id: u.id,
            full_name: u.full_name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
            banned: u.banned,
        }
    }
}

/// Claims carried in our HS256 access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// subject / user id
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}
