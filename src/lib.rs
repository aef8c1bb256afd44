pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod scoring;
pub mod stats;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
}
