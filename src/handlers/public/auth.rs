// handlers/public/auth.rs - POST /login

use axum::{extract::State, Json};

use crate::auth;
use crate::error::ApiError;
use crate::models::{LoginRequest, Token};
use crate::AppState;

/// POST /login - verify credentials against the users table and issue a JWT.
///
/// Both the unknown-user and wrong-password paths answer 401 without saying
/// which one failed.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Token>, ApiError> {
    let username = payload.username.to_lowercase();

    if !state.repository.user_exists(&username).await? {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let user = state
        .repository
        .get_user_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !auth::password::verify_password(&payload.password, &user.password)? {
        return Err(ApiError::unauthorized("Incorrect username or password"));
    }

    let token = auth::issue_token(&username)?;
    Ok(Json(token))
}
