//! Run lifecycle operations: create, claim, finalize, stats, retention.

use crate::error::DatabaseError;
use crate::types::{Run, RunId, RunStatus};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};

use super::{Database, RunRow};

const RUN_COLUMNS: &str =
    "run_id, scheduled_date, status, error, created_at, started_at, finished_at, failed_at";

impl Database {
    /// Create a new run in SCHEDULED state
    ///
    /// Returns the generated run identifier. The run stays SCHEDULED until an
    /// executor claims it.
    pub async fn create_scheduled_run(&self, scheduled_date: NaiveDate) -> Result<RunId> {
        let run_id = RunId::generate();

        sqlx::query(
            r#"
            INSERT INTO runs (run_id, scheduled_date, status, created_at)
            VALUES (?, ?, 'SCHEDULED', ?)
            "#,
        )
        .bind(run_id.as_str())
        .bind(scheduled_date.to_string())
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to create scheduled run: {}",
                e
            )))
        })?;

        Ok(run_id)
    }

    /// Atomically claim the oldest SCHEDULED run
    ///
    /// Transitions it to STARTED and stamps `started_at` in a single
    /// conditional UPDATE, so two concurrent callers can never claim the same
    /// run. Returns `None` when no SCHEDULED run exists, which is a normal
    /// outcome rather than an error.
    pub async fn claim_oldest_scheduled(&self, started_at: DateTime<Utc>) -> Result<Option<Run>> {
        let row = sqlx::query_as::<_, RunRow>(&format!(
            r#"
            UPDATE runs
            SET status = 'STARTED', started_at = ?
            WHERE run_id = (
                SELECT run_id FROM runs
                WHERE status = 'SCHEDULED'
                ORDER BY created_at, run_id
                LIMIT 1
            )
            AND status = 'SCHEDULED'
            RETURNING {RUN_COLUMNS}
            "#
        ))
        .bind(started_at.timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to claim scheduled run: {}",
                e
            )))
        })?;

        Ok(row.map(Run::from))
    }

    /// Transition a STARTED run to a terminal state
    ///
    /// Guarded on the current status being STARTED, so replaying a finalize
    /// after it has already been applied is a no-op and can never double-stamp
    /// timestamps. Returns whether a row was actually transitioned.
    pub async fn finalize_run(
        &self,
        run_id: &RunId,
        status: RunStatus,
        timestamp: DateTime<Utc>,
        error: Option<&str>,
    ) -> Result<bool> {
        let query = match status {
            RunStatus::Finished => sqlx::query(
                r#"
                UPDATE runs SET status = 'FINISHED', finished_at = ?
                WHERE run_id = ? AND status = 'STARTED'
                "#,
            )
            .bind(timestamp.timestamp())
            .bind(run_id.as_str()),
            RunStatus::Failed => sqlx::query(
                r#"
                UPDATE runs SET status = 'FAILED', failed_at = ?, error = ?
                WHERE run_id = ? AND status = 'STARTED'
                "#,
            )
            .bind(timestamp.timestamp())
            .bind(error)
            .bind(run_id.as_str()),
            other => {
                return Err(Error::InvalidRequest(format!(
                    "cannot finalize run to non-terminal status {}",
                    other
                )));
            }
        };

        let result = query.execute(&self.pool).await.map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to finalize run {}: {}",
                run_id, e
            )))
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Release STARTED runs whose claim has gone stale
    ///
    /// A run claimed before `older_than` is assumed abandoned (the claiming
    /// process crashed or was killed) and is flipped back to SCHEDULED so a
    /// later executor pass can pick it up. Returns the number of runs
    /// released.
    pub async fn reclaim_stale_started(&self, older_than: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE runs
            SET status = 'SCHEDULED', started_at = NULL
            WHERE status = 'STARTED' AND started_at < ?
            "#,
        )
        .bind(older_than.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to reclaim stale runs: {}",
                e
            )))
        })?;

        Ok(result.rows_affected())
    }

    /// Get one run by ID
    pub async fn get_run(&self, run_id: &RunId) -> Result<Option<Run>> {
        let row = sqlx::query_as::<_, RunRow>(&format!(
            "SELECT {RUN_COLUMNS} FROM runs WHERE run_id = ?"
        ))
        .bind(run_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get run {}: {}",
                run_id, e
            )))
        })?;

        Ok(row.map(Run::from))
    }

    /// List runs, optionally filtered by scheduled date
    ///
    /// Newest first.
    pub async fn list_runs(&self, filter_date: Option<NaiveDate>) -> Result<Vec<Run>> {
        let rows = if let Some(date) = filter_date {
            sqlx::query_as::<_, RunRow>(&format!(
                "SELECT {RUN_COLUMNS} FROM runs WHERE scheduled_date = ? ORDER BY created_at DESC"
            ))
            .bind(date.to_string())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, RunRow>(&format!(
                "SELECT {RUN_COLUMNS} FROM runs ORDER BY created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list runs: {}",
                e
            )))
        })?;

        Ok(rows.into_iter().map(Run::from).collect())
    }

    /// Delete runs scheduled before the given date
    ///
    /// Returns the number of runs deleted.
    pub async fn delete_runs_before(&self, date: NaiveDate) -> Result<u64> {
        let result = sqlx::query("DELETE FROM runs WHERE scheduled_date < ?")
            .bind(date.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to delete old runs: {}",
                    e
                )))
            })?;

        Ok(result.rows_affected())
    }

    /// Average execution duration over an inclusive scheduled-date range
    ///
    /// Considers only runs with both `started_at` and `finished_at` stamped.
    /// Returns the mean duration in seconds and the number of qualifying
    /// runs, or `None` when no run qualifies.
    pub async fn average_duration(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Option<(f64, i64)>> {
        let (avg, count): (Option<f64>, i64) = sqlx::query_as(
            r#"
            SELECT AVG(finished_at - started_at), COUNT(*)
            FROM runs
            WHERE started_at IS NOT NULL
              AND finished_at IS NOT NULL
              AND scheduled_date >= ?
              AND scheduled_date <= ?
            "#,
        )
        .bind(from.to_string())
        .bind(to.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to compute average duration: {}",
                e
            )))
        })?;

        Ok(avg.map(|a| (a, count)))
    }
}
