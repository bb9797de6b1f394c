// handlers/public/users.rs - user registration and the public probe

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::password;
use crate::error::ApiError;
use crate::models::CreateUserRequest;
use crate::AppState;

/// POST /users - create a user.
///
/// Usernames are stored lowercased; the conflict and failure paths answer
/// with message objects rather than error statuses, which the registration
/// client branches on.
pub async fn user_create(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let username = payload.username.to_lowercase();
    let password_hash = password::hash_password(&payload.password)?;

    if state.repository.user_exists(&username).await? {
        return Ok(Json(json!({ "message": "User already exists" })));
    }

    match state.repository.insert_user(&username, &password_hash).await? {
        Some(_) => Ok(Json(json!({ "message": "User created successfully" }))),
        None => Ok(Json(json!({ "message": "User creation failed" }))),
    }
}

/// GET /users/test - liveness probe for the public surface
pub async fn user_test() -> Json<Value> {
    Json(json!({ "success": "public api" }))
}
