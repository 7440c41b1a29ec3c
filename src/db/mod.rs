//! Database layer for adstxt-crawler
//!
//! Handles SQLite persistence for crawl runs and seller entries.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`runs`] — Run lifecycle (create, claim, finalize, stats, retention)
//! - [`sellers`] — Seller entry persistence and queries

use crate::types::{Run, RunId, RunStatus, SellerEntry};
use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::{sqlite::SqlitePool, FromRow};

mod migrations;
mod runs;
mod sellers;

/// Run record as stored in SQLite
///
/// Calendar dates are ISO-8601 TEXT (which compares correctly with `<`),
/// timestamps are unix seconds.
#[derive(Debug, Clone, FromRow)]
pub struct RunRow {
    /// Unique run identifier (UUID v4 string)
    pub run_id: String,
    /// Calendar date the run was created, ISO-8601
    pub scheduled_date: String,
    /// Lifecycle status (SCHEDULED/STARTED/FINISHED/FAILED)
    pub status: String,
    /// Failure description, set only on FAILED runs
    pub error: Option<String>,
    /// Unix timestamp when the record was created
    pub created_at: i64,
    /// Unix timestamp when the run was claimed
    pub started_at: Option<i64>,
    /// Unix timestamp when the run finished
    pub finished_at: Option<i64>,
    /// Unix timestamp when the run failed
    pub failed_at: Option<i64>,
}

impl From<RunRow> for Run {
    fn from(row: RunRow) -> Self {
        let ts = |secs: i64| Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now);

        Run {
            run_id: RunId(row.run_id),
            scheduled_date: row
                .scheduled_date
                .parse()
                .unwrap_or_else(|_| Utc::now().date_naive()),
            status: RunStatus::from_str_db(&row.status).unwrap_or(RunStatus::Failed),
            error: row.error,
            created_at: ts(row.created_at),
            started_at: row.started_at.map(ts),
            finished_at: row.finished_at.map(ts),
            failed_at: row.failed_at.map(ts),
        }
    }
}

/// Seller entry record as stored in SQLite
#[derive(Debug, Clone, FromRow)]
pub struct SellerEntryRow {
    /// Surrogate rowid
    pub id: i64,
    /// Publisher domain the entry was fetched from
    pub site: String,
    /// Advertising system domain
    pub ssp_domain_name: String,
    /// Publisher account ID
    pub publisher_id: String,
    /// Relationship as found in the source
    pub relationship: String,
    /// Certification authority ID, if present
    pub tag_id: Option<String>,
    /// Ingestion date, ISO-8601
    pub date: String,
    /// Owning run
    pub run_id: String,
}

impl From<SellerEntryRow> for SellerEntry {
    fn from(row: SellerEntryRow) -> Self {
        SellerEntry {
            id: row.id,
            site: row.site,
            ssp_domain_name: row.ssp_domain_name,
            publisher_id: row.publisher_id,
            relationship: row.relationship,
            tag_id: row.tag_id,
            date: row
                .date
                .parse::<NaiveDate>()
                .unwrap_or_else(|_| Utc::now().date_naive()),
            run_id: RunId(row.run_id),
        }
    }
}

/// Database handle for adstxt-crawler
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Close the database connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
