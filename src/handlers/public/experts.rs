// handlers/public/experts.rs - paged expert listing and lookup

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

use super::PageParams;

/// GET /experts - paged expert rows
pub async fn expert_list(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Value>, ApiError> {
    let experts = state
        .repository
        .get_experts(page.page_number, page.page_size)
        .await?;
    Ok(Json(json!({ "data": experts })))
}

/// GET /experts/:id - expert by id
pub async fn expert_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    match state.repository.get_expert_by_id(id).await? {
        Some(expert) => Ok(Json(json!({ "data": expert }))),
        None => Ok(Json(json!({ "message": "Expert not found" }))),
    }
}
