// handlers/protected/litigations.rs - GET /litigations

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthClaims;
use crate::AppState;

/// GET /litigations - the full litigation list, bearer-protected.
pub async fn litigation_list(
    AuthClaims(_claims): AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let litigations = state.repository.get_litigations().await?;
    Ok(Json(json!({ "data": litigations })))
}
