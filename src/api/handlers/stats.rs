use axum::extract::State;
use axum::Json;

use crate::db::prediction_repo;
use crate::errors::AppError;
use crate::stats::{self, LeaderboardStats};
use crate::AppState;

/// GET /stats/leaderboard — full recompute over all predictions
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardStats>, AppError> {
    let predictions = prediction_repo::list_predictions(&state.db, None, None).await?;

    let stats = stats::compute_leaderboard(&predictions).map_err(anyhow::Error::from)?;

    Ok(Json(stats))
}
