use super::*;
use crate::config::CrawlConfig;
use crate::db::Database;
use crate::executor::RunExecutor;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::io::Write;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot()
use wiremock::MockServer;

mod stats;

/// Everything a router test needs, with temp files kept alive
struct TestApp {
    router: Router,
    db: Arc<Database>,
    server: MockServer,
    _db_file: tempfile::NamedTempFile,
    _sites_file: tempfile::NamedTempFile,
}

/// Build a router over a fresh database, a mock upstream and one configured site
async fn test_app() -> TestApp {
    let server = MockServer::start().await;

    let db_file = tempfile::NamedTempFile::new().unwrap();
    let db = Arc::new(Database::new(db_file.path()).await.unwrap());

    let mut sites_file = tempfile::NamedTempFile::new().unwrap();
    write!(sites_file, r#"{{"sites": ["example.com"]}}"#).unwrap();

    let config = Arc::new(Config {
        sites_file: sites_file.path().to_path_buf(),
        crawl: CrawlConfig {
            url_template: format!("{}/{{site}}/ads.txt", server.uri()),
            ..Default::default()
        },
        ..Default::default()
    });

    let executor = Arc::new(RunExecutor::new(db.clone(), config.clone()).unwrap());
    let router = create_router(db.clone(), executor, config);

    TestApp {
        router,
        db,
        server,
        _db_file: db_file,
        _sites_file: sites_file,
    }
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        // Extractor rejections (e.g. missing query params) have plain-text bodies
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
        })
    };
    (status, json)
}

async fn post_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
