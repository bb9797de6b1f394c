pub mod auth;

pub use auth::{bearer_guard, AuthClaims};
