mod common;

use predtrack::db::prediction_repo;
use predtrack::models::{PredictionState, PredictionStatus};

#[tokio::test]
async fn test_create_starts_open_without_outcome() {
    let pool = common::setup_test_db().await;

    let prediction = common::seed_prediction(&pool, "It will rain tomorrow", "Weather", 0.7).await;

    assert!(prediction.id > 0);
    assert_eq!(prediction.state, PredictionState::Open);
    assert_eq!(prediction.state.outcome(), None);
    assert_eq!(prediction.created_at, prediction.updated_at);
}

#[tokio::test]
async fn test_ids_assigned_monotonically() {
    let pool = common::setup_test_db().await;

    let first = common::seed_prediction(&pool, "first", "a", 0.5).await;
    let second = common::seed_prediction(&pool, "second", "a", 0.5).await;

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let pool = common::setup_test_db().await;

    let first = common::seed_prediction(&pool, "first", "a", 0.5).await;
    let second = common::seed_prediction(&pool, "second", "b", 0.5).await;
    let third = common::seed_prediction(&pool, "third", "a", 0.5).await;

    let all = prediction_repo::list_predictions(&pool, None, None)
        .await
        .unwrap();

    let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_list_filters_by_status_and_category() {
    let pool = common::setup_test_db().await;

    let open_weather = common::seed_prediction(&pool, "rain", "Weather", 0.7).await;
    let resolved_weather = common::seed_prediction(&pool, "snow", "Weather", 0.3).await;
    common::seed_prediction(&pool, "match", "Sports", 0.6).await;

    prediction_repo::resolve_prediction(&pool, resolved_weather.id, 0)
        .await
        .unwrap()
        .expect("resolution should succeed");

    let open = prediction_repo::list_predictions(&pool, Some(PredictionStatus::Open), None)
        .await
        .unwrap();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|p| p.state == PredictionState::Open));

    let resolved = prediction_repo::list_predictions(&pool, Some(PredictionStatus::Resolved), None)
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, resolved_weather.id);

    let weather = prediction_repo::list_predictions(&pool, None, Some("Weather"))
        .await
        .unwrap();
    assert_eq!(weather.len(), 2);

    let open_and_weather =
        prediction_repo::list_predictions(&pool, Some(PredictionStatus::Open), Some("Weather"))
            .await
            .unwrap();
    assert_eq!(open_and_weather.len(), 1);
    assert_eq!(open_and_weather[0].id, open_weather.id);

    let empty = prediction_repo::list_predictions(&pool, None, Some("Politics"))
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_resolve_sets_outcome_and_refreshes_updated_at() {
    let pool = common::setup_test_db().await;

    let prediction = common::seed_prediction(&pool, "rain", "Weather", 0.7).await;

    let resolved = prediction_repo::resolve_prediction(&pool, prediction.id, 1)
        .await
        .unwrap()
        .expect("resolution should succeed");

    assert_eq!(resolved.state, PredictionState::Resolved { outcome: 1 });
    assert!(resolved.updated_at >= prediction.updated_at);
    assert_eq!(resolved.created_at, prediction.created_at);
}

#[tokio::test]
async fn test_resolve_unknown_id_matches_nothing() {
    let pool = common::setup_test_db().await;

    let result = prediction_repo::resolve_prediction(&pool, 9999, 1)
        .await
        .unwrap();
    assert!(result.is_none());

    let all = prediction_repo::list_predictions(&pool, None, None)
        .await
        .unwrap();
    assert!(all.is_empty());
}

async fn insert_raw_row(
    pool: &sqlx::SqlitePool,
    status: &str,
    outcome: Option<i64>,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO predictions (statement, category, confidence, due_at, status, outcome, created_at, updated_at)
        VALUES ('raw row', 'Misc', 0.7, $1, $2, $3, $1, $1)
        RETURNING id
        "#,
    )
    .bind(chrono::Utc::now())
    .bind(status)
    .bind(outcome)
    .fetch_one(pool)
    .await
    .expect("raw insert should succeed")
}

#[tokio::test]
async fn test_decode_rejects_resolved_row_without_outcome() {
    let pool = common::setup_test_db().await;

    let id = insert_raw_row(&pool, "resolved", None).await;

    assert!(prediction_repo::get_prediction(&pool, id).await.is_err());
    assert!(prediction_repo::list_predictions(&pool, None, None)
        .await
        .is_err());
}

#[tokio::test]
async fn test_decode_rejects_open_row_with_outcome() {
    let pool = common::setup_test_db().await;

    let id = insert_raw_row(&pool, "open", Some(1)).await;

    assert!(prediction_repo::get_prediction(&pool, id).await.is_err());
}

#[tokio::test]
async fn test_decode_rejects_unknown_status() {
    let pool = common::setup_test_db().await;

    let id = insert_raw_row(&pool, "cancelled", None).await;

    assert!(prediction_repo::get_prediction(&pool, id).await.is_err());
}

#[tokio::test]
async fn test_second_resolution_never_overwrites() {
    let pool = common::setup_test_db().await;

    let prediction = common::seed_prediction(&pool, "rain", "Weather", 0.7).await;

    prediction_repo::resolve_prediction(&pool, prediction.id, 1)
        .await
        .unwrap()
        .expect("first resolution should succeed");

    // The open-status guard in the UPDATE makes the second attempt a no-op
    let second = prediction_repo::resolve_prediction(&pool, prediction.id, 0)
        .await
        .unwrap();
    assert!(second.is_none());

    let stored = prediction_repo::get_prediction(&pool, prediction.id)
        .await
        .unwrap()
        .expect("record should still exist");
    assert_eq!(stored.state, PredictionState::Resolved { outcome: 1 });
}
