//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`runs`] — Run listing and manual scheduling/execution triggers
//! - [`sellers`] — Seller entry queries
//! - [`stats`] — Aggregate run statistics
//! - [`system`] — Health and OpenAPI

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod runs;
mod sellers;
mod stats;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use runs::*;
pub use sellers::*;
pub use stats::*;
pub use system::*;

// ============================================================================
// Query/Request Types (shared across handlers)
// ============================================================================

/// Query parameters for GET /runs
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RunsQuery {
    /// Only return runs scheduled on this date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
}

/// Query parameters for GET /sellers
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SellersQuery {
    /// Publisher domain to list sellers for
    pub domain: String,
}

/// Query parameters for GET /stats
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StatsQuery {
    /// Start of the inclusive scheduled-date range (YYYY-MM-DD)
    pub from: NaiveDate,
    /// End of the inclusive scheduled-date range (YYYY-MM-DD)
    pub to: NaiveDate,
}

/// Response body for GET /stats
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatsResponse {
    /// Start of the queried range
    pub from_date: NaiveDate,
    /// End of the queried range
    pub to_date: NaiveDate,
    /// Mean of `finished_at - started_at` over qualifying runs, in seconds
    pub average_execution_time_seconds: f64,
    /// Number of runs the average was computed over
    pub runs_considered: i64,
}
