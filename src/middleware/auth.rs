use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Request-level bearer token interceptor.
///
/// Requests without an `Authorization` header pass through untouched; routes
/// that require authentication enforce it with the [`AuthClaims`] extractor.
/// A header that is present but malformed or carries an invalid token is
/// rejected here, before any handler runs.
pub async fn bearer_guard(request: Request, next: Next) -> Response {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return next.run(request).await;
    };

    let Ok(value) = header.to_str() else {
        return reject("Malformed Authorization header");
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return reject("Authorization header must use Bearer token format");
    };

    match auth::verify_token(token.trim()) {
        Ok(_) => next.run(request).await,
        Err(err) => reject(&err.to_string()),
    }
}

fn reject(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

/// Verified JWT claims extracted from the `Authorization` header.
///
/// Handlers that take this as an argument require a valid bearer token.
pub struct AuthClaims(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let value = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Authorization header must use Bearer token format"))?;

        if token.trim().is_empty() {
            return Err(ApiError::unauthorized("Empty bearer token"));
        }

        let claims = auth::verify_token(token.trim())?;
        Ok(AuthClaims(claims))
    }
}
