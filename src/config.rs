//! Configuration types for adstxt-crawler

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
///
/// Works out of the box with `Config::default()`; every field can be
/// overridden individually, and the whole struct round-trips through serde
/// for file-backed configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file (default: "./adstxt.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Path to the JSON sites file (default: "./sites.json")
    ///
    /// Re-read on every executor pass so edits take effect without restart.
    #[serde(default = "default_sites_file")]
    pub sites_file: PathBuf,

    /// Crawl behavior (timeouts, concurrency, URL construction)
    #[serde(default)]
    pub crawl: CrawlConfig,

    /// Retention window for stored runs and seller entries
    #[serde(default)]
    pub retention: RetentionConfig,

    /// Background scheduler cadence
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// REST API server settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            sites_file: default_sites_file(),
            crawl: CrawlConfig::default(),
            retention: RetentionConfig::default(),
            scheduler: SchedulerConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Per-site HTTP request timeout (default: 10 seconds)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: Duration,

    /// Maximum sites fetched concurrently within one run (default: 8)
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// URL template for a site's ads.txt endpoint
    ///
    /// `{site}` is replaced with the configured domain. The default follows
    /// the ads.txt convention of serving the file at the domain root over
    /// HTTPS.
    #[serde(default = "default_url_template")]
    pub url_template: String,

    /// Age after which a STARTED run is considered abandoned and becomes
    /// claimable again (default: 30 minutes)
    ///
    /// Covers the crash-mid-run case: without this, a run claimed by a
    /// process that died would stay STARTED forever.
    #[serde(default = "default_stale_claim_after")]
    pub stale_claim_after: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: default_fetch_timeout(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            url_template: default_url_template(),
            stale_claim_after: default_stale_claim_after(),
        }
    }
}

/// Retention window configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Age threshold beyond which runs and seller entries are purged
    /// (default: 24 hours)
    #[serde(default = "default_retention_max_age")]
    pub max_age: Duration,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_age: default_retention_max_age(),
        }
    }
}

/// Background scheduler cadence
///
/// The scheduler loop wakes once per `tick_interval` and fires each task
/// whose own interval has elapsed since its last firing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// How often a new SCHEDULED run is created (default: 24 hours)
    #[serde(default = "default_schedule_interval")]
    pub schedule_interval: Duration,

    /// How often the executor looks for a pending run (default: 5 minutes)
    #[serde(default = "default_execute_interval")]
    pub execute_interval: Duration,

    /// How often the retention sweeper runs (default: 24 hours)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: Duration,

    /// Scheduler loop wake-up interval (default: 10 seconds)
    #[serde(default = "default_tick_interval")]
    pub tick_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            schedule_interval: default_schedule_interval(),
            execute_interval: default_execute_interval(),
            sweep_interval: default_sweep_interval(),
            tick_interval: default_tick_interval(),
        }
    }
}

/// REST API server settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address the API server binds to (default: 127.0.0.1:7070)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Whether to serve the interactive Swagger UI at /swagger-ui
    #[serde(default = "default_true")]
    pub enable_swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            enable_swagger_ui: default_true(),
        }
    }
}

/// On-disk shape of the sites file: `{"sites": ["example.com", ...]}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SitesFile {
    /// Publisher domains to crawl, in file order
    pub sites: Vec<String>,
}

impl Config {
    /// Load the configured site list from `sites_file`
    ///
    /// Read fresh on every call; a missing or malformed file is an
    /// orchestration-level error (it fails the whole run, not one site).
    pub fn load_sites(&self) -> Result<Vec<String>> {
        let raw = std::fs::read_to_string(&self.sites_file).map_err(|e| Error::Config {
            message: format!(
                "failed to read sites file {}: {}",
                self.sites_file.display(),
                e
            ),
            key: Some("sites_file".to_string()),
        })?;
        let parsed: SitesFile = serde_json::from_str(&raw).map_err(|e| Error::Config {
            message: format!(
                "failed to parse sites file {}: {}",
                self.sites_file.display(),
                e
            ),
            key: Some("sites_file".to_string()),
        })?;
        Ok(parsed.sites)
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./adstxt.db")
}

fn default_sites_file() -> PathBuf {
    PathBuf::from("./sites.json")
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_concurrent_fetches() -> usize {
    8
}

fn default_url_template() -> String {
    "https://{site}/ads.txt".to_string()
}

fn default_stale_claim_after() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_retention_max_age() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_schedule_interval() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_execute_interval() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_sweep_interval() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_bind_address() -> SocketAddr {
    // Safe: literal is a valid socket address
    "127.0.0.1:7070".parse().unwrap_or_else(|_| {
        SocketAddr::from(([127, 0, 0, 1], 7070))
    })
}

fn default_true() -> bool {
    true
}
