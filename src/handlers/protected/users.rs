// handlers/protected/users.rs - GET /users/me

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::middleware::AuthClaims;
use crate::models::User;
use crate::AppState;

/// GET /users/me - the user row behind the bearer token's subject.
pub async fn user_me(
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .repository
        .get_user_by_username(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid access token"))?;

    Ok(Json(user))
}
