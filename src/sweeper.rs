//! Retention sweeping: purge runs and seller entries past the retention window.

use crate::config::RetentionConfig;
use crate::db::Database;
use crate::types::SweepReport;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Deletes stored runs and seller entries older than the retention window
///
/// The two deletions are independent bulk deletes; a failure in one is
/// logged and does not affect the other, and neither can crash the caller.
pub struct RetentionSweeper {
    db: Arc<Database>,
    config: RetentionConfig,
}

impl RetentionSweeper {
    /// Create a sweeper over the given database
    pub fn new(db: Arc<Database>, config: RetentionConfig) -> Self {
        Self { db, config }
    }

    /// Purge records older than the retention window, relative to `now`
    ///
    /// The cutoff is `now - max_age` truncated to a calendar date; rows dated
    /// strictly before it are deleted. Counts of deleted rows are logged and
    /// returned.
    pub async fn sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let max_age = chrono::Duration::from_std(self.config.max_age)
            .unwrap_or_else(|_| chrono::Duration::hours(24));
        let cutoff = (now - max_age).date_naive();

        let entries_deleted = match self.db.delete_seller_entries_before(cutoff).await {
            Ok(n) => {
                info!(cutoff = %cutoff, deleted = n, "Purged old seller entries");
                n
            }
            Err(e) => {
                error!(cutoff = %cutoff, error = %e, "Failed to purge seller entries");
                0
            }
        };

        let runs_deleted = match self.db.delete_runs_before(cutoff).await {
            Ok(n) => {
                info!(cutoff = %cutoff, deleted = n, "Purged old runs");
                n
            }
            Err(e) => {
                error!(cutoff = %cutoff, error = %e, "Failed to purge runs");
                0
            }
        };

        SweepReport {
            cutoff,
            entries_deleted,
            runs_deleted,
        }
    }
}
