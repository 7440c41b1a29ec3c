//! HTTP fetching of per-site ads.txt files

use crate::config::CrawlConfig;
use crate::error::{Error, FetchError, FetchErrorKind, Result};
use tracing::debug;

/// Fetches one site's ads.txt over HTTP
///
/// Each fetch issues a single GET against the site's ads.txt endpoint with a
/// bounded timeout. All failure modes (DNS, TLS, refused connection, timeout,
/// non-2xx status) surface as a typed [`FetchError`] naming the site, so the
/// executor can isolate the failure to that site.
#[derive(Debug, Clone)]
pub struct SiteFetcher {
    client: reqwest::Client,
    url_template: String,
}

impl SiteFetcher {
    /// Create a fetcher from crawl configuration
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {}", e),
                key: Some("crawl.fetch_timeout".to_string()),
            })?;

        Ok(Self {
            client,
            url_template: config.url_template.clone(),
        })
    }

    /// URL for a site's ads.txt endpoint
    pub fn ads_txt_url(&self, site: &str) -> String {
        self.url_template.replace("{site}", site)
    }

    /// Fetch the ads.txt body for one site
    ///
    /// Returns the response body on any 2xx status. Everything else becomes a
    /// [`FetchError`]; this method never panics on unreachable or misbehaving
    /// sites.
    pub async fn fetch(&self, site: &str) -> std::result::Result<String, FetchError> {
        let url = self.ads_txt_url(site);
        debug!(site = %site, url = %url, "Fetching ads.txt");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError {
                site: site.to_string(),
                kind: FetchErrorKind::from(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError {
                site: site.to_string(),
                kind: FetchErrorKind::HttpStatus(status.as_u16()),
            });
        }

        response.text().await.map_err(|e| FetchError {
            site: site.to_string(),
            kind: FetchErrorKind::from(e),
        })
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> CrawlConfig {
        CrawlConfig {
            url_template: format!("{}/{{site}}/ads.txt", server.uri()),
            fetch_timeout: std::time::Duration::from_secs(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_url_construction() {
        let fetcher = SiteFetcher::new(&CrawlConfig::default()).unwrap();
        assert_eq!(
            fetcher.ads_txt_url("example.com"),
            "https://example.com/ads.txt"
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/example.com/ads.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ssp.com, 1, DIRECT\n"))
            .mount(&server)
            .await;

        let fetcher = SiteFetcher::new(&test_config(&server)).unwrap();
        let body = fetcher.fetch("example.com").await.unwrap();
        assert_eq!(body, "ssp.com, 1, DIRECT\n");
    }

    #[tokio::test]
    async fn test_fetch_404_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/example.com/ads.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = SiteFetcher::new(&test_config(&server)).unwrap();
        let err = fetcher.fetch("example.com").await.unwrap_err();
        assert_eq!(err.site, "example.com");
        assert!(matches!(err.kind, FetchErrorKind::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow.example/ads.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_secs(5))
                    .set_body_string("too late"),
            )
            .mount(&server)
            .await;

        let config = CrawlConfig {
            fetch_timeout: std::time::Duration::from_millis(200),
            ..test_config(&server)
        };
        let fetcher = SiteFetcher::new(&config).unwrap();
        let err = fetcher.fetch("slow.example").await.unwrap_err();
        assert_eq!(err.site, "slow.example");
        assert!(matches!(err.kind, FetchErrorKind::Timeout));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_error() {
        // Port from a server that has been shut down. An exclusive (non-pooled)
        // server is required: pooled servers keep listening after drop.
        let server = MockServer::builder().start().await;
        let uri = server.uri();
        drop(server);

        let config = CrawlConfig {
            url_template: format!("{}/{{site}}/ads.txt", uri),
            fetch_timeout: std::time::Duration::from_secs(2),
            ..Default::default()
        };
        let fetcher = SiteFetcher::new(&config).unwrap();
        let err = fetcher.fetch("example.com").await.unwrap_err();
        assert!(matches!(
            err.kind,
            FetchErrorKind::Transport(_) | FetchErrorKind::Timeout
        ));
    }
}
