use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use predtrack::db;
use predtrack::models::Prediction;
use predtrack::AppState;

/// Open a fresh in-memory database with the schema applied.
///
/// Single connection only: every connection to `sqlite::memory:` opens its
/// own distinct database.
#[allow(dead_code)]
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        // An in-memory database lives exactly as long as its connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    db::create_schema(&pool)
        .await
        .expect("Failed to create schema");

    pool
}

/// Build the real router around a fresh in-memory store.
#[allow(dead_code)]
pub async fn build_test_app() -> (axum::Router, SqlitePool) {
    let pool = setup_test_db().await;

    let state = AppState { db: pool.clone() };

    let router = predtrack::api::router::create_router(state);
    (router, pool)
}

/// Seed an open prediction due a week out.
#[allow(dead_code)]
pub async fn seed_prediction(
    pool: &SqlitePool,
    statement: &str,
    category: &str,
    confidence: f64,
) -> Prediction {
    predtrack::db::prediction_repo::insert_prediction(
        pool,
        statement,
        category,
        confidence,
        Utc::now() + Duration::days(7),
    )
    .await
    .expect("Failed to seed prediction")
}
