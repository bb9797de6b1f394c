// handlers/public/home.rs - GET /home composite document

use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::services::{HomepageAggregator, HomepageOutcome};
use crate::AppState;

/// GET /home - the composite homepage document.
///
/// All three outcomes answer 200; clients discriminate by the presence of
/// `subfactors` versus `message` in the body.
pub async fn home_get(State(state): State<AppState>) -> Response {
    let aggregator = HomepageAggregator::new(state.repository.clone());

    match aggregator.build().await {
        HomepageOutcome::Document(document) => Json(document).into_response(),
        HomepageOutcome::Empty => {
            Json(json!({ "message": "No structural subfactors found" })).into_response()
        }
        HomepageOutcome::Failed(_) => {
            Json(json!({ "message": "Error fetching home page data" })).into_response()
        }
    }
}
