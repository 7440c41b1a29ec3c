use super::*;
use crate::types::RunStatus;
use chrono::{Duration, Utc};

/// Seed one finished run with the given execution duration
async fn seed_finished_run(app: &TestApp, secs: i64) {
    let run_id = app
        .db
        .create_scheduled_run(Utc::now().date_naive())
        .await
        .unwrap();
    let started = Utc::now();
    app.db.claim_oldest_scheduled(started).await.unwrap().unwrap();
    app.db
        .finalize_run(
            &run_id,
            RunStatus::Finished,
            started + Duration::seconds(secs),
            None,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stats_rejects_inverted_range() {
    let app = test_app().await;
    let (status, json) = get_json(
        app.router.clone(),
        "/stats?from=2026-08-26&to=2026-08-01",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_stats_empty_range_is_404() {
    let app = test_app().await;
    let (status, json) = get_json(
        app.router.clone(),
        "/stats?from=2020-01-01&to=2020-01-31",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_stats_average_over_finished_runs() {
    let app = test_app().await;
    seed_finished_run(&app, 10).await;
    seed_finished_run(&app, 20).await;

    let today = Utc::now().date_naive();
    let (status, json) = get_json(
        app.router.clone(),
        &format!("/stats?from={}&to={}", today, today),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["average_execution_time_seconds"], 15.0);
    assert_eq!(json["runs_considered"], 2);
    assert_eq!(json["from_date"], today.to_string());
}

#[tokio::test]
async fn test_stats_requires_both_bounds() {
    let app = test_app().await;
    let (status, _json) = get_json(app.router.clone(), "/stats?from=2026-08-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
