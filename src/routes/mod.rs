use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod health;
pub mod interests;
pub mod listings;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/classificado", listings::router())
        .nest("/interesse", interests::router())
        .nest("/auth", auth::router())
}
