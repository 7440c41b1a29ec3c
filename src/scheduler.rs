//! Background scheduling of run creation, execution and retention sweeps
//!
//! An explicit service owning the interval table, constructed once at process
//! start; there is no ambient global scheduler state. The loop wakes on a
//! short tick and fires each task whose interval has elapsed:
//!
//! - create a new SCHEDULED run (daily by default)
//! - look for a pending run to execute (every 5 minutes by default)
//! - sweep records past the retention window (daily by default)
//!
//! # Example
//!
//! ```no_run
//! use adstxt_crawler::{Config, Database, RunExecutor, RetentionSweeper, Scheduler};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(Config::default());
//! let db = Arc::new(Database::new(&config.database_path).await?);
//! let executor = Arc::new(RunExecutor::new(db.clone(), config.clone())?);
//! let sweeper = Arc::new(RetentionSweeper::new(db.clone(), config.retention.clone()));
//!
//! let scheduler = Scheduler::new(executor, sweeper, config.scheduler.clone());
//! let shutdown = scheduler.shutdown_handle();
//!
//! // Run scheduler (loops until shutdown)
//! tokio::spawn(async move {
//!     scheduler.run().await;
//! });
//!
//! // Later: stop the loop
//! shutdown.shutdown();
//! # Ok(())
//! # }
//! ```

use crate::config::SchedulerConfig;
use crate::executor::RunExecutor;
use crate::sweeper::RetentionSweeper;
use crate::types::ExecutionReport;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Handle for signalling the scheduler loop to stop
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Request a graceful stop; the loop exits on its next tick
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Periodic driver for the crawl workflow
pub struct Scheduler {
    executor: Arc<RunExecutor>,
    sweeper: Arc<RetentionSweeper>,
    config: SchedulerConfig,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    /// Create a scheduler over the executor and sweeper
    pub fn new(
        executor: Arc<RunExecutor>,
        sweeper: Arc<RetentionSweeper>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            executor,
            sweeper,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for stopping the loop from another task
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: self.shutdown.clone(),
        }
    }

    /// Run the scheduling loop until shutdown is requested
    ///
    /// Each task fires immediately on the first tick and then on its own
    /// interval. Task failures are logged and never stop the loop.
    pub async fn run(self) {
        info!(
            schedule_interval = ?self.config.schedule_interval,
            execute_interval = ?self.config.execute_interval,
            sweep_interval = ?self.config.sweep_interval,
            "Scheduler started"
        );

        let mut last_schedule: Option<Instant> = None;
        let mut last_execute: Option<Instant> = None;
        let mut last_sweep: Option<Instant> = None;

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                info!("Scheduler shutting down");
                break;
            }

            let now = Instant::now();

            if due(last_schedule, now, self.config.schedule_interval) {
                match self.executor.schedule_run().await {
                    Ok(run) => info!(run_id = %run.run_id, "Created scheduled run"),
                    Err(e) => error!(error = %e, "Failed to create scheduled run"),
                }
                last_schedule = Some(now);
            }

            if due(last_execute, now, self.config.execute_interval) {
                match self.executor.execute().await {
                    Ok(ExecutionReport::NoPendingRun) => {
                        debug!("Executor pass found no pending run");
                    }
                    Ok(ExecutionReport::Completed(report)) => {
                        info!(
                            run_id = %report.run_id,
                            status = %report.status,
                            total_entries = report.total_entries,
                            "Executor pass completed a run"
                        );
                    }
                    Err(e) => error!(error = %e, "Executor pass failed"),
                }
                last_execute = Some(now);
            }

            if due(last_sweep, now, self.config.sweep_interval) {
                let report = self.sweeper.sweep(Utc::now()).await;
                info!(
                    runs_deleted = report.runs_deleted,
                    entries_deleted = report.entries_deleted,
                    "Retention sweep completed"
                );
                last_sweep = Some(now);
            }

            sleep(self.config.tick_interval).await;
        }

        info!("Scheduler stopped");
    }
}

fn due(last: Option<Instant>, now: Instant, interval: std::time::Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.duration_since(last) >= interval,
    }
}
