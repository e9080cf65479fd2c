//! Route groups owned by the authentication feature area
//!
//! Each group is mounted by the route aggregator under its own prefix;
//! the groups themselves only know about their handlers.

use crate::api::handlers::AppState;
use axum::{routing::post, Router};

/// Login group, mounted under `/login`
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/", post(crate::auth::handlers::login))
}

/// Registration group, mounted under `/register`
pub fn register_routes() -> Router<AppState> {
    Router::new().route("/", post(crate::auth::handlers::register))
}
