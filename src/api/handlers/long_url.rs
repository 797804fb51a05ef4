//! Handler for resolving a short code without counting a click.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::short_url::ResolvedUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the original URL and click count for a short code.
///
/// # Endpoint
///
/// `GET /short_url/get_long_url/{short_code}`
///
/// Served through the read-through cache.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_long_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolvedUrlResponse>, AppError> {
    let short_url = state.short_url_service.resolve(&short_code).await?;

    Ok(Json(short_url.into()))
}
