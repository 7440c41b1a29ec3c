//! Core domain types shared across the crate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a crawl run
///
/// Assigned once at creation (a UUID v4 string) and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a fresh run identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle state of a crawl run
///
/// Transitions: `Scheduled` → `Started` → `Finished` or `Failed`.
/// `Finished` and `Failed` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Created and waiting to be claimed by the executor
    Scheduled,
    /// Claimed by an executor, crawl in progress
    Started,
    /// Crawl completed (individual sites may still have failed)
    Finished,
    /// Orchestration-level failure aborted the crawl
    Failed,
}

impl RunStatus {
    /// Database/text representation of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Scheduled => "SCHEDULED",
            RunStatus::Started => "STARTED",
            RunStatus::Finished => "FINISHED",
            RunStatus::Failed => "FAILED",
        }
    }

    /// Parse a status from its database representation
    pub fn from_str_db(s: &str) -> Option<Self> {
        match s {
            "SCHEDULED" => Some(RunStatus::Scheduled),
            "STARTED" => Some(RunStatus::Started),
            "FINISHED" => Some(RunStatus::Finished),
            "FAILED" => Some(RunStatus::Failed),
            _ => None,
        }
    }

    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Finished | RunStatus::Failed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One crawl run as exposed to API consumers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Run {
    /// Unique run identifier
    pub run_id: RunId,
    /// Calendar date the run was created
    pub scheduled_date: NaiveDate,
    /// Current lifecycle status
    pub status: RunStatus,
    /// Failure description, set only when status is `Failed`
    pub error: Option<String>,
    /// When the run record was created
    pub created_at: DateTime<Utc>,
    /// When the run was claimed by an executor
    pub started_at: Option<DateTime<Utc>>,
    /// When the run finished successfully
    pub finished_at: Option<DateTime<Utc>>,
    /// When the run failed
    pub failed_at: Option<DateTime<Utc>>,
}

/// One authorized-seller record parsed from a single ads.txt line
///
/// Field semantics follow the ads.txt convention: advertising system domain,
/// publisher account ID, account relationship, optional certification
/// authority ID. The `relationship` field is stored as found in the source
/// and must be treated as untrusted free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdsTxtRecord {
    /// Advertising system (SSP) domain name
    pub ssp_domain_name: String,
    /// Publisher account ID within the advertising system
    pub publisher_id: String,
    /// Account relationship, e.g. DIRECT or RESELLER (not validated)
    pub relationship: String,
    /// Certification authority ID, present only on 4-field lines
    pub tag_id: Option<String>,
}

/// One persisted authorized-seller entry, scoped to a run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerEntry {
    /// Surrogate identifier assigned by storage
    pub id: i64,
    /// Publisher domain the entry was fetched from
    pub site: String,
    /// Advertising system (SSP) domain name
    pub ssp_domain_name: String,
    /// Publisher account ID within the advertising system
    pub publisher_id: String,
    /// Account relationship as found in the source
    pub relationship: String,
    /// Certification authority ID, if present
    pub tag_id: Option<String>,
    /// Calendar date of ingestion
    pub date: NaiveDate,
    /// Owning run
    pub run_id: RunId,
}

/// Outcome of processing a single site within one run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteOutcome {
    /// Publisher domain that was processed
    pub site: String,
    /// What happened for this site
    pub result: SiteResult,
}

/// Per-site result variants
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SiteResult {
    /// Fetch, parse and persist all succeeded
    Stored {
        /// Number of seller entries persisted for this site
        entries: u64,
        /// Number of malformed lines skipped during parsing
        skipped_lines: u64,
    },
    /// The HTTP fetch failed; no entries were stored
    FetchFailed {
        /// Human-readable failure description
        reason: String,
    },
    /// Entries were parsed but could not be persisted
    StoreFailed {
        /// Human-readable failure description
        reason: String,
    },
}

impl SiteResult {
    /// Whether this site produced stored entries
    pub fn is_success(&self) -> bool {
        matches!(self, SiteResult::Stored { .. })
    }
}

/// Result of one `RunExecutor::execute()` invocation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExecutionReport {
    /// No SCHEDULED run existed; nothing was done
    NoPendingRun,
    /// A run was claimed and driven to a terminal state
    Completed(RunReport),
}

/// Details of a claimed-and-finalized run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunReport {
    /// The run that was executed
    pub run_id: RunId,
    /// Terminal status the run reached
    pub status: RunStatus,
    /// Per-site outcomes, in no guaranteed order
    pub sites: Vec<SiteOutcome>,
    /// Total seller entries persisted across all sites
    pub total_entries: u64,
}

impl RunReport {
    /// Number of sites that stored entries successfully
    pub fn sites_succeeded(&self) -> usize {
        self.sites.iter().filter(|s| s.result.is_success()).count()
    }

    /// Number of sites that failed to fetch or store
    pub fn sites_failed(&self) -> usize {
        self.sites.len() - self.sites_succeeded()
    }
}

/// Result of one retention sweep
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SweepReport {
    /// Calendar cutoff; records dated strictly before it were deleted
    pub cutoff: NaiveDate,
    /// Seller entries deleted
    pub entries_deleted: u64,
    /// Runs deleted
    pub runs_deleted: u64,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RunStatus::Scheduled,
            RunStatus::Started,
            RunStatus::Finished,
            RunStatus::Failed,
        ] {
            assert_eq!(RunStatus::from_str_db(status.as_str()), Some(status));
        }
        assert_eq!(RunStatus::from_str_db("RUNNING"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RunStatus::Scheduled.is_terminal());
        assert!(!RunStatus::Started.is_terminal());
        assert!(RunStatus::Finished.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
    }

    #[test]
    fn test_run_report_counts() {
        let report = RunReport {
            run_id: RunId::generate(),
            status: RunStatus::Finished,
            sites: vec![
                SiteOutcome {
                    site: "a.com".into(),
                    result: SiteResult::Stored {
                        entries: 3,
                        skipped_lines: 0,
                    },
                },
                SiteOutcome {
                    site: "b.com".into(),
                    result: SiteResult::FetchFailed {
                        reason: "timeout".into(),
                    },
                },
            ],
            total_entries: 3,
        };
        assert_eq!(report.sites_succeeded(), 1);
        assert_eq!(report.sites_failed(), 1);
    }
}
