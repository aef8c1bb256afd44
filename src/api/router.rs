use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // CORS: the web dashboard runs on a different origin in development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/predictions",
            get(handlers::predictions::list).post(handlers::predictions::create),
        )
        .route("/predictions/:id/resolve", post(handlers::predictions::resolve))
        .route("/stats/leaderboard", get(handlers::stats::leaderboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
