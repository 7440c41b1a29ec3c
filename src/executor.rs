//! Run execution: claim a pending run, crawl every configured site, finalize.
//!
//! The executor is the write path of the system. One `execute()` pass:
//!
//! 1. Releases stale claims left behind by crashed executors.
//! 2. Atomically claims the oldest SCHEDULED run (no run is a normal no-op).
//! 3. Fetches, parses and persists every configured site concurrently, with
//!    per-site fault isolation: a dead site or a malformed line never affects
//!    the other sites.
//! 4. Transitions the run to FINISHED, or to FAILED when the orchestration
//!    itself broke (unreadable sites file, storage outage on claim).
//!
//! Per-site failures deliberately do not fail the run; they are carried in
//! the returned [`ExecutionReport`] and logged so operators can see partial
//! failures without the run status hiding orchestration health.

use crate::config::Config;
use crate::db::Database;
use crate::fetcher::SiteFetcher;
use crate::parser::parse_ads_txt;
use crate::types::{
    ExecutionReport, Run, RunReport, RunStatus, SiteOutcome, SiteResult,
};
use crate::{Error, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Claims pending runs and drives the crawl-and-store workflow
pub struct RunExecutor {
    db: Arc<Database>,
    fetcher: SiteFetcher,
    config: Arc<Config>,
}

impl RunExecutor {
    /// Create an executor over the given database and configuration
    pub fn new(db: Arc<Database>, config: Arc<Config>) -> Result<Self> {
        let fetcher = SiteFetcher::new(&config.crawl)?;
        Ok(Self {
            db,
            fetcher,
            config,
        })
    }

    /// Execute one pending run, if any
    ///
    /// Safe to call concurrently and on a timer: the claim step is a single
    /// conditional update, so at most one caller wins a given run and the
    /// others observe [`ExecutionReport::NoPendingRun`].
    ///
    /// Returns an error only when the claim step itself cannot reach storage;
    /// every failure after a successful claim is absorbed into the run's
    /// terminal state.
    pub async fn execute(&self) -> Result<ExecutionReport> {
        self.release_stale_claims().await;

        let Some(run) = self.db.claim_oldest_scheduled(Utc::now()).await? else {
            debug!("No scheduled run to execute");
            return Ok(ExecutionReport::NoPendingRun);
        };

        info!(run_id = %run.run_id, "Claimed run");

        let report = match self.crawl_all_sites(&run).await {
            Ok(sites) => {
                let total_entries = sites
                    .iter()
                    .map(|s| match s.result {
                        SiteResult::Stored { entries, .. } => entries,
                        _ => 0,
                    })
                    .sum();
                let report = RunReport {
                    run_id: run.run_id.clone(),
                    status: RunStatus::Finished,
                    sites,
                    total_entries,
                };
                info!(
                    run_id = %run.run_id,
                    sites_succeeded = report.sites_succeeded(),
                    sites_failed = report.sites_failed(),
                    total_entries = report.total_entries,
                    "Run finished"
                );
                self.finalize(&run, RunStatus::Finished, None).await;
                report
            }
            Err(e) => {
                let message = e.to_string();
                error!(run_id = %run.run_id, error = %message, "Run failed");
                self.finalize(&run, RunStatus::Failed, Some(&message)).await;
                RunReport {
                    run_id: run.run_id.clone(),
                    status: RunStatus::Failed,
                    sites: Vec::new(),
                    total_entries: 0,
                }
            }
        };

        Ok(ExecutionReport::Completed(report))
    }

    /// Crawl every configured site with bounded concurrency
    ///
    /// Only orchestration-level failures (site list unreadable) return an
    /// error; per-site outcomes are collected, never propagated.
    async fn crawl_all_sites(&self, run: &Run) -> Result<Vec<SiteOutcome>> {
        let sites = self.config.load_sites()?;
        info!(run_id = %run.run_id, site_count = sites.len(), "Crawling configured sites");

        let outcomes = stream::iter(sites)
            .map(|site| self.process_site(run, site))
            .buffer_unordered(self.config.crawl.max_concurrent_fetches.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(outcomes)
    }

    /// Fetch, parse and persist a single site
    ///
    /// Infallible by design: every failure mode becomes a [`SiteOutcome`].
    async fn process_site(&self, run: &Run, site: String) -> SiteOutcome {
        let body = match self.fetcher.fetch(&site).await {
            Ok(body) => body,
            Err(e) => {
                warn!(run_id = %run.run_id, site = %site, error = %e, "Site fetch failed");
                return SiteOutcome {
                    site,
                    result: SiteResult::FetchFailed {
                        reason: e.kind.to_string(),
                    },
                };
            }
        };

        let mut records_iter = parse_ads_txt(&body);
        let records: Vec<_> = records_iter.by_ref().collect();
        let skipped_lines = records_iter.skipped_lines();

        let today = Utc::now().date_naive();
        match self
            .db
            .insert_seller_entries(&run.run_id, today, &site, &records)
            .await
        {
            Ok(entries) => {
                debug!(
                    run_id = %run.run_id,
                    site = %site,
                    entries,
                    skipped_lines,
                    "Stored seller entries"
                );
                SiteOutcome {
                    site,
                    result: SiteResult::Stored {
                        entries,
                        skipped_lines,
                    },
                }
            }
            Err(e) => {
                error!(run_id = %run.run_id, site = %site, error = %e, "Failed to store seller entries");
                SiteOutcome {
                    site,
                    result: SiteResult::StoreFailed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Persist the terminal transition exactly once
    ///
    /// A commit failure here is logged and not retried; the run keeps
    /// whatever state was last durably written.
    async fn finalize(&self, run: &Run, status: RunStatus, error: Option<&str>) {
        match self
            .db
            .finalize_run(&run.run_id, status, Utc::now(), error)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    run_id = %run.run_id,
                    status = %status,
                    "Finalize was a no-op; run already left STARTED"
                );
            }
            Err(e) => {
                error!(
                    run_id = %run.run_id,
                    status = %status,
                    error = %e,
                    "Failed to persist terminal run state"
                );
            }
        }
    }

    /// Flip abandoned STARTED runs back to SCHEDULED
    ///
    /// Failures are logged only; stale-claim recovery must never block the
    /// current pass.
    async fn release_stale_claims(&self) {
        let threshold = chrono::Duration::from_std(self.config.crawl.stale_claim_after)
            .unwrap_or_else(|_| chrono::Duration::minutes(30));
        match self.db.reclaim_stale_started(Utc::now() - threshold).await {
            Ok(0) => {}
            Ok(n) => warn!(count = n, "Released stale run claims"),
            Err(e) => warn!(error = %e, "Failed to check for stale run claims"),
        }
    }

    /// Create a new SCHEDULED run
    ///
    /// Used by the periodic scheduler and the manual-trigger API; the created
    /// run is picked up by the next `execute()` pass (or one triggered
    /// immediately by the caller).
    pub async fn schedule_run(&self) -> Result<Run> {
        let run_id = self.db.create_scheduled_run(Utc::now().date_naive()).await?;
        info!(run_id = %run_id, "Scheduled new run");
        self.db
            .get_run(&run_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("run {} vanished after creation", run_id)))
    }
}
