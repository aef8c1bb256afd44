use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{Prediction, PredictionStatus};

/// Insert a new prediction. Status always starts open with no outcome,
/// regardless of what the caller sent over the wire.
pub async fn insert_prediction(
    pool: &SqlitePool,
    statement: &str,
    category: &str,
    confidence: f64,
    due_at: DateTime<Utc>,
) -> anyhow::Result<Prediction> {
    let now = Utc::now();

    let prediction = sqlx::query_as::<_, Prediction>(
        r#"
        INSERT INTO predictions (statement, category, confidence, due_at, status, outcome, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'open', NULL, $5, $5)
        RETURNING *
        "#,
    )
    .bind(statement)
    .bind(category)
    .bind(confidence)
    .bind(due_at)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(prediction)
}

/// Fetch predictions, optionally filtered by status and/or category,
/// newest-created first. The id tiebreak keeps ordering deterministic when
/// two records share a creation timestamp.
pub async fn list_predictions(
    pool: &SqlitePool,
    status: Option<PredictionStatus>,
    category: Option<&str>,
) -> anyhow::Result<Vec<Prediction>> {
    let predictions = match (status, category) {
        (None, None) => {
            sqlx::query_as::<_, Prediction>(
                "SELECT * FROM predictions ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(pool)
            .await?
        }
        (Some(status), None) => {
            sqlx::query_as::<_, Prediction>(
                "SELECT * FROM predictions WHERE status = $1 ORDER BY created_at DESC, id DESC",
            )
            .bind(status.as_str())
            .fetch_all(pool)
            .await?
        }
        (None, Some(category)) => {
            sqlx::query_as::<_, Prediction>(
                "SELECT * FROM predictions WHERE category = $1 ORDER BY created_at DESC, id DESC",
            )
            .bind(category)
            .fetch_all(pool)
            .await?
        }
        (Some(status), Some(category)) => {
            sqlx::query_as::<_, Prediction>(
                r#"
                SELECT * FROM predictions
                WHERE status = $1 AND category = $2
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(status.as_str())
            .bind(category)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(predictions)
}

/// Fetch a prediction by id.
pub async fn get_prediction(pool: &SqlitePool, id: i64) -> anyhow::Result<Option<Prediction>> {
    let prediction = sqlx::query_as::<_, Prediction>("SELECT * FROM predictions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(prediction)
}

/// Resolve an open prediction with the given outcome.
///
/// The status guard sits in the UPDATE itself, so the check and the write are
/// one atomic statement: two concurrent resolutions of the same id cannot
/// both succeed. Returns `None` when no open row matched — the id is unknown
/// or the record was already resolved; the caller disambiguates.
pub async fn resolve_prediction(
    pool: &SqlitePool,
    id: i64,
    outcome: i64,
) -> anyhow::Result<Option<Prediction>> {
    let prediction = sqlx::query_as::<_, Prediction>(
        r#"
        UPDATE predictions
        SET status = 'resolved', outcome = $2, updated_at = $3
        WHERE id = $1 AND status = 'open'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(outcome)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(prediction)
}
