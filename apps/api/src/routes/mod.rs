pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers as profile;
use crate::ranking::handlers as ranking;
use crate::state::AppState;

/// Resume and jobs uploads share one request body.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations
        .route("/recommend", post(ranking::handle_recommend))
        .route(
            "/recommend_from_jobs",
            post(ranking::handle_recommend_from_jobs),
        )
        .route("/search_jobs", get(ranking::handle_search_jobs))
        // Profiles
        .route(
            "/profile",
            get(profile::handle_get_profile).post(profile::handle_save_profile),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
