//! Seller entry query handlers.

use super::SellersQuery;
use crate::api::AppState;
use crate::error::Error;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

/// GET /sellers - Seller entries for a publisher domain
///
/// An empty result is reported as 404 rather than an empty list: a domain
/// with no stored sellers is indistinguishable from a never-crawled one, and
/// callers treat both as "nothing known".
#[utoipa::path(
    get,
    path = "/sellers",
    tag = "sellers",
    params(
        ("domain" = String, Query, description = "Publisher domain to list sellers for")
    ),
    responses(
        (status = 200, description = "Seller entries", body = Vec<SellerEntry>),
        (status = 404, description = "No sellers found for domain", body = crate::error::ApiError)
    )
)]
pub async fn list_sellers(
    State(state): State<AppState>,
    Query(query): Query<SellersQuery>,
) -> Result<impl IntoResponse, Error> {
    let sellers = state.db.list_sellers(&query.domain).await?;
    if sellers.is_empty() {
        return Err(Error::NotFound(format!(
            "no sellers found for {}",
            query.domain
        )));
    }
    Ok(Json(sellers))
}
