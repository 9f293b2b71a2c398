use crate::app::state::AppState;
use crate::handler::health::health_handler;
use crate::handler::session::clear_session_handler;
use crate::handler::songs::{songs_bands_handler, songs_weighted_handler};
use axum::Router;
use axum::routing::{delete, get, post};

/// Build the HTTP router (health + genre search + session reset).
pub fn api_router(state: AppState) -> Router {
    let health_router = Router::new().route("/api/health", get(health_handler));

    let search_router = Router::new()
        .route("/api/songs_weighted", post(songs_weighted_handler))
        .route("/api/songs_bands", post(songs_bands_handler))
        .route("/api/session", delete(clear_session_handler))
        .with_state(state);

    Router::new().merge(health_router).merge(search_router)
}
