pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod queries;
pub mod store;

use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use store::UserStore;

pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Routes for the users API wrapped in the CORS and content-type layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users", get(api::list_users).post(api::create_user))
        .route(
            "/api/users/:id",
            get(api::get_user)
                .put(api::update_user)
                .delete(api::delete_user),
        )
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(from_fn(middleware::json_content_type))
        .layer(from_fn(middleware::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
