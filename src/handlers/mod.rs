use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

use crate::AppState;

pub mod protected;
pub mod public;

/// GET / - service info document
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Civica API",
            "version": version,
            "description": "Civic data backend serving structural subfactors, harms and risks, nonprofits and experts",
            "endpoints": {
                "home": "/home (public - composite homepage document)",
                "login": "/login (public - token acquisition)",
                "users": "/users (public - registration), /users/me (protected)",
                "litigations": "/litigations (protected)",
                "nonprofits": "/nonprofits[/:id] (public, paged)",
                "experts": "/experts[/:id] (public, paged)",
            }
        }
    }))
}

/// GET /health - liveness probe that pings the backing store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.repository.probe().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "data store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
