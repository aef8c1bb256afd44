use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Open,
    Resolved,
}

impl PredictionStatus {
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "open" => Some(PredictionStatus::Open),
            "resolved" => Some(PredictionStatus::Resolved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Open => "open",
            PredictionStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Resolution state as a single variant: an outcome exists only on a resolved
/// record, so "resolved without outcome" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionState {
    Open,
    Resolved { outcome: i64 },
}

impl PredictionState {
    pub fn status(&self) -> PredictionStatus {
        match self {
            PredictionState::Open => PredictionStatus::Open,
            PredictionState::Resolved { .. } => PredictionStatus::Resolved,
        }
    }

    pub fn outcome(&self) -> Option<i64> {
        match self {
            PredictionState::Open => None,
            PredictionState::Resolved { outcome } => Some(*outcome),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub id: i64,
    pub statement: String,
    pub category: String,
    pub confidence: f64,
    pub due_at: DateTime<Utc>,
    pub state: PredictionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Prediction {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let outcome: Option<i64> = row.try_get("outcome")?;

        // Reject rows violating the outcome-iff-resolved invariant rather
        // than smuggling them into the domain type.
        let state = match (status.as_str(), outcome) {
            ("open", None) => PredictionState::Open,
            ("resolved", Some(outcome)) => PredictionState::Resolved { outcome },
            ("open", Some(_)) => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "outcome".into(),
                    source: "open prediction carries an outcome".into(),
                })
            }
            ("resolved", None) => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "outcome".into(),
                    source: "resolved prediction has no outcome".into(),
                })
            }
            (other, _) => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "status".into(),
                    source: format!("unknown prediction status {other:?}").into(),
                })
            }
        };

        Ok(Prediction {
            id: row.try_get("id")?,
            statement: row.try_get("statement")?,
            category: row.try_get("category")?,
            confidence: row.try_get("confidence")?,
            due_at: row.try_get("due_at")?,
            state,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
