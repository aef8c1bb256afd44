use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::prediction_repo;
use crate::errors::AppError;
use crate::models::{Prediction, PredictionState, PredictionStatus};
use crate::scoring::{self, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Creation input. Status and outcome are deliberately absent: whatever the
/// caller sends for them is ignored and the record starts open.
#[derive(Deserialize)]
pub struct CreatePredictionRequest {
    pub statement: String,
    pub category: String,
    pub confidence: f64,
    pub due_at: DateTime<Utc>,
}

impl CreatePredictionRequest {
    fn validate(&self) -> Result<(), AppError> {
        let statement_len = self.statement.chars().count();
        if statement_len < 1 || statement_len > 1000 {
            return Err(AppError::Validation(
                "statement must be between 1 and 1000 characters".into(),
            ));
        }

        let category_len = self.category.chars().count();
        if category_len < 1 || category_len > 100 {
            return Err(AppError::Validation(
                "category must be between 1 and 100 characters".into(),
            ));
        }

        if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&self.confidence) {
            return Err(AppError::Validation(
                "confidence must be between 0.01 and 0.99".into(),
            ));
        }

        Ok(())
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct ResolvePredictionRequest {
    pub outcome: i64,
}

/// Wire shape of a prediction. `brier_score` is derived at response time from
/// the stored record and never persisted.
#[derive(Serialize)]
pub struct PredictionResponse {
    pub id: i64,
    pub statement: String,
    pub category: String,
    pub confidence: f64,
    pub due_at: DateTime<Utc>,
    pub status: PredictionStatus,
    pub outcome: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub brier_score: Option<f64>,
}

impl PredictionResponse {
    pub fn from_record(prediction: &Prediction) -> Result<Self, AppError> {
        let brier_score = match prediction.state {
            PredictionState::Open => None,
            PredictionState::Resolved { outcome } => Some(
                scoring::brier_score(prediction.confidence, outcome)
                    .map_err(anyhow::Error::from)?,
            ),
        };

        Ok(Self {
            id: prediction.id,
            statement: prediction.statement.clone(),
            category: prediction.category.clone(),
            confidence: prediction.confidence,
            due_at: prediction.due_at,
            status: prediction.state.status(),
            outcome: prediction.state.outcome(),
            created_at: prediction.created_at,
            updated_at: prediction.updated_at,
            brier_score,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /predictions — register a new prediction
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePredictionRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    req.validate()?;

    let prediction = prediction_repo::insert_prediction(
        &state.db,
        &req.statement,
        &req.category,
        req.confidence,
        req.due_at,
    )
    .await?;

    tracing::info!(id = prediction.id, category = %prediction.category, "Prediction created");

    Ok(Json(PredictionResponse::from_record(&prediction)?))
}

/// GET /predictions — list predictions, newest first, with optional filters
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PredictionResponse>>, AppError> {
    let status = match params.status.as_deref() {
        None | Some("") => None,
        Some(s) => Some(PredictionStatus::from_param(s).ok_or_else(|| {
            AppError::Validation("status must be 'open' or 'resolved'".into())
        })?),
    };
    let category = params.category.as_deref().filter(|c| !c.is_empty());

    let predictions = prediction_repo::list_predictions(&state.db, status, category).await?;

    let responses = predictions
        .iter()
        .map(PredictionResponse::from_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

/// POST /predictions/{id}/resolve — one-way transition to resolved
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ResolvePredictionRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    if req.outcome != 0 && req.outcome != 1 {
        return Err(AppError::Validation("outcome must be 0 or 1".into()));
    }

    match prediction_repo::resolve_prediction(&state.db, id, req.outcome).await? {
        Some(prediction) => {
            tracing::info!(id, outcome = req.outcome, "Prediction resolved");
            Ok(Json(PredictionResponse::from_record(&prediction)?))
        }
        // No open row matched: unknown id or already resolved
        None => match prediction_repo::get_prediction(&state.db, id).await? {
            Some(_) => Err(AppError::InvalidTransition(
                "prediction already resolved".into(),
            )),
            None => Err(AppError::NotFound("prediction not found".into())),
        },
    }
}
