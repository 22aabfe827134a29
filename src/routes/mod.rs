use axum::{Router, routing::get};

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod index;
pub mod params;
pub mod products;

// Build the service router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health_check))
        .nest("/products", products::router())
}
