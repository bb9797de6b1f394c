use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod testing;

use store::repository::Repository;

/// Shared application state, injected into every handler.
///
/// The repository owns the backing-store client; nothing else in the crate
/// holds an ambient handle to the store.
#[derive(Clone)]
pub struct AppState {
    pub repository: Repository,
}

/// Build the full application router.
///
/// Routes are mounted both at the root and under `/v1`, matching the prefix
/// the deployed clients already use.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(litigation_routes())
        .merge(nonprofit_routes())
        .merge(expert_routes())
        .merge(home_routes());

    Router::new()
        // Public service endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Versioned API plus the unprefixed mirror
        .nest("/v1", api.clone())
        .merge(api)
        // Global middleware
        .layer(axum::middleware::from_fn(middleware::bearer_guard))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config::config().api.max_request_size_bytes))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new().route("/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    use handlers::{protected, public};

    Router::new()
        .route("/users", post(public::users::user_create))
        .route("/users/test", get(public::users::user_test))
        .route("/users/me", get(protected::users::user_me))
}

fn litigation_routes() -> Router<AppState> {
    use handlers::protected::litigations;

    Router::new().route("/litigations", get(litigations::litigation_list))
}

fn nonprofit_routes() -> Router<AppState> {
    use handlers::public::nonprofits;

    Router::new()
        .route("/nonprofits", get(nonprofits::nonprofit_list))
        .route("/nonprofits/:id", get(nonprofits::nonprofit_get))
}

fn expert_routes() -> Router<AppState> {
    use handlers::public::experts;

    Router::new()
        .route("/experts", get(experts::expert_list))
        .route("/experts/:id", get(experts::expert_get))
}

fn home_routes() -> Router<AppState> {
    use handlers::public::home;

    Router::new().route("/home", get(home::home_get))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
