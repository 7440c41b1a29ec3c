//! Aggregate run statistics handlers.

use super::{StatsQuery, StatsResponse};
use crate::api::AppState;
use crate::error::Error;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

/// GET /stats - Average run execution time over an inclusive date range
///
/// Only runs with both `started_at` and `finished_at` stamped are
/// considered. The range is validated before storage is touched, and an
/// empty result set is a 404, not a zero average.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    params(
        ("from" = String, Query, description = "Start of the inclusive date range (YYYY-MM-DD)"),
        ("to" = String, Query, description = "End of the inclusive date range (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Average execution time", body = StatsResponse),
        (status = 400, description = "from is later than to", body = crate::error::ApiError),
        (status = 404, description = "No runs in the date range", body = crate::error::ApiError)
    )
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, Error> {
    if query.from > query.to {
        return Err(Error::InvalidRequest(
            "from must be earlier than or equal to to".to_string(),
        ));
    }

    let (average, count) = state
        .db
        .average_duration(query.from, query.to)
        .await?
        .ok_or_else(|| Error::NotFound("no runs found in the specified date range".to_string()))?;

    Ok(Json(StatsResponse {
        from_date: query.from,
        to_date: query.to,
        average_execution_time_seconds: average,
        runs_considered: count,
    }))
}
