//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the adstxt-crawler REST API using
//! utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the adstxt-crawler REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "adstxt-crawler REST API",
        version = "0.2.0",
        description = "REST API for inspecting ads.txt crawl runs, stored seller entries, and triggering crawls manually",
        license(name = "MIT OR Apache-2.0")
    ),
    paths(
        // Runs
        crate::api::routes::list_runs,
        crate::api::routes::get_run,
        crate::api::routes::schedule_run,
        crate::api::routes::execute_run,

        // Sellers
        crate::api::routes::list_sellers,

        // Stats
        crate::api::routes::get_stats,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::Run,
        crate::types::RunId,
        crate::types::RunStatus,
        crate::types::SellerEntry,
        crate::types::AdsTxtRecord,
        crate::types::SiteOutcome,
        crate::types::SiteResult,
        crate::types::ExecutionReport,
        crate::types::RunReport,
        crate::error::ApiError,
        crate::error::ErrorDetail,
        crate::api::routes::StatsResponse,
    )),
    tags(
        (name = "runs", description = "Crawl run lifecycle and manual triggers"),
        (name = "sellers", description = "Stored authorized-seller entries"),
        (name = "stats", description = "Aggregate run statistics"),
        (name = "system", description = "Health and documentation")
    )
)]
pub struct ApiDoc;
