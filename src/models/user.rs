use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User row from the users table.
///
/// The password hash never serializes back out; `/users/me` returns the row
/// as-is otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub active: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}
