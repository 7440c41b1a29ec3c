//! # adstxt-crawler
//!
//! Backend library for periodically crawling publisher `ads.txt` files and
//! tracking each crawl as a durable, lifecycle-managed run.
//!
//! ## Design Philosophy
//!
//! adstxt-crawler is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Fault-isolating** - A dead site or malformed line never fails a run
//! - **Crash-safe** - Run state lives in SQLite; stale claims are reclaimed
//! - **Sensible defaults** - Works out of the box with zero configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use adstxt_crawler::{Config, Database, RetentionSweeper, RunExecutor, Scheduler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(Config::default());
//!     let db = Arc::new(Database::new(&config.database_path).await?);
//!
//!     let executor = Arc::new(RunExecutor::new(db.clone(), config.clone())?);
//!     let sweeper = Arc::new(RetentionSweeper::new(db.clone(), config.retention.clone()));
//!
//!     // Background scheduling: daily run creation, 5-minute executor passes,
//!     // daily retention sweeps
//!     let scheduler = Scheduler::new(executor.clone(), sweeper, config.scheduler.clone());
//!     let shutdown = scheduler.shutdown_handle();
//!     tokio::spawn(async move { scheduler.run().await });
//!
//!     // REST API for inspection and manual triggers
//!     adstxt_crawler::api::start_api_server(db, executor, config).await?;
//!
//!     shutdown.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Run execution orchestration
pub mod executor;
/// HTTP fetching of ads.txt files
pub mod fetcher;
/// ads.txt parsing
pub mod parser;
/// Background task scheduling
pub mod scheduler;
/// Retention sweeping
pub mod sweeper;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, CrawlConfig, RetentionConfig, SchedulerConfig};
pub use db::Database;
pub use error::{ApiError, DatabaseError, Error, FetchError, FetchErrorKind, Result, ToHttpStatus};
pub use executor::RunExecutor;
pub use fetcher::SiteFetcher;
pub use scheduler::{Scheduler, ShutdownHandle};
pub use sweeper::RetentionSweeper;
pub use types::{
    AdsTxtRecord, ExecutionReport, Run, RunId, RunReport, RunStatus, SellerEntry, SiteOutcome,
    SiteResult, SweepReport,
};

/// Helper to run a scheduler until a termination signal arrives.
///
/// Waits for SIGTERM/SIGINT (Unix) or Ctrl+C (elsewhere), then signals the
/// scheduler loop to stop and waits for it to drain.
///
/// # Example
///
/// ```no_run
/// use adstxt_crawler::{Config, Database, RetentionSweeper, RunExecutor, Scheduler};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Config::default());
///     let db = Arc::new(Database::new(&config.database_path).await?);
///     let executor = Arc::new(RunExecutor::new(db.clone(), config.clone())?);
///     let sweeper = Arc::new(RetentionSweeper::new(db, config.retention.clone()));
///     let scheduler = Scheduler::new(executor, sweeper, config.scheduler.clone());
///
///     adstxt_crawler::run_with_shutdown(scheduler).await;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(scheduler: Scheduler) {
    let shutdown = scheduler.shutdown_handle();
    let handle = tokio::spawn(async move { scheduler.run().await });

    wait_for_signal().await;
    shutdown.shutdown();

    if let Err(e) = handle.await {
        tracing::error!(error = %e, "Scheduler task panicked during shutdown");
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        _ => {
            tracing::warn!("Could not register signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
