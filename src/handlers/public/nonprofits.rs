// handlers/public/nonprofits.rs - paged nonprofit listing and entity lookup

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

use super::PageParams;

/// GET /nonprofits - paged nonprofit rows
pub async fn nonprofit_list(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Value>, ApiError> {
    let nonprofits = state
        .repository
        .get_nonprofits(page.page_number, page.page_size)
        .await?;
    Ok(Json(json!({ "data": nonprofits })))
}

/// GET /nonprofits/:id - the entity record behind a nonprofit
pub async fn nonprofit_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    match state.repository.resolve_entity_by_nonprofit_id(id).await? {
        Some(entity) => Ok(Json(json!({ "data": entity }))),
        None => Ok(Json(json!({ "message": "Nonprofit not found" }))),
    }
}
