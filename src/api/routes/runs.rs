//! Run listing and manual trigger handlers.

use super::RunsQuery;
use crate::api::AppState;
use crate::error::Error;
use crate::types::{ExecutionReport, RunId};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

/// GET /runs - List runs, optionally filtered by scheduled date
#[utoipa::path(
    get,
    path = "/runs",
    tag = "runs",
    params(
        ("date" = Option<String>, Query, description = "Only return runs scheduled on this date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Runs", body = Vec<Run>),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn list_runs(
    State(state): State<AppState>,
    Query(query): Query<RunsQuery>,
) -> Result<impl IntoResponse, Error> {
    let runs = state.db.list_runs(query.date).await?;
    Ok(Json(runs))
}

/// GET /runs/:id - Get a single run
#[utoipa::path(
    get,
    path = "/runs/{id}",
    tag = "runs",
    params(
        ("id" = String, Path, description = "Run identifier")
    ),
    responses(
        (status = 200, description = "Run", body = Run),
        (status = 404, description = "Run not found", body = crate::error::ApiError)
    )
)]
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let run_id = RunId(id);
    let run = state
        .db
        .get_run(&run_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("run {}", run_id)))?;
    Ok(Json(run))
}

/// POST /runs/schedule - Create a SCHEDULED run and trigger execution
///
/// Mirrors the periodic trigger path but on demand: the run is created
/// first, then an executor pass is started in the background. The pass is
/// idempotent with respect to claiming, so overlapping triggers are safe.
#[utoipa::path(
    post,
    path = "/runs/schedule",
    tag = "runs",
    responses(
        (status = 201, description = "Created run", body = Run),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn schedule_run(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let run = state.executor.schedule_run().await?;

    let executor = state.executor.clone();
    tokio::spawn(async move {
        if let Err(e) = executor.execute().await {
            error!(error = %e, "Background execution after manual schedule failed");
        }
    });

    Ok((StatusCode::CREATED, Json(run)))
}

/// POST /runs/execute - Execute the oldest SCHEDULED run now
#[utoipa::path(
    post,
    path = "/runs/execute",
    tag = "runs",
    responses(
        (status = 200, description = "Execution report", body = ExecutionReport),
        (status = 404, description = "No scheduled run to execute", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn execute_run(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    match state.executor.execute().await? {
        ExecutionReport::NoPendingRun => Err(Error::NotFound(
            "no scheduled run to execute".to_string(),
        )),
        report @ ExecutionReport::Completed(_) => Ok(Json(report)),
    }
}
