//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /short_url/{short_code}`
///
/// # Request Flow
///
/// 1. Invalidate the cached lookup for the code
/// 2. Atomically increment the click count in storage
/// 3. Invalidate the cached lookup again
/// 4. Return 307 Temporary Redirect to the long URL
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 if the stored URL cannot be used as a `Location` header.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let short_url = state.short_url_service.record_redirect(&short_code).await?;

    debug!("Redirecting {} -> {}", short_code, short_url.long_url);

    let location = HeaderValue::try_from(short_url.long_url.as_str()).map_err(|e| {
        error!("Stored URL for {} is not a valid Location: {}", short_code, e);
        AppError::internal(
            "Stored URL cannot be redirected to",
            json!({ "short_code": short_code }),
        )
    })?;

    Ok((
        StatusCode::TEMPORARY_REDIRECT,
        [(header::LOCATION, location)],
    ))
}
