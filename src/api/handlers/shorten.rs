//! Handler for short URL creation.

use axum::{Json, extract::State};
use tracing::info;
use validator::Validate;

use crate::api::dto::short_url::{ShortUrlResponse, UrlPayload};
use crate::error::AppError;
use crate::state::AppState;

/// Generates and stores a short code for a long URL.
///
/// # Endpoint
///
/// `POST /short_url/generate_short_url`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_code": "aB3dE", "long_url": "https://example.com" }
/// ```
///
/// Shortening the same URL again returns the existing code.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 409 Conflict if no unique code could be generated.
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<UrlPayload>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    payload.validate()?;

    info!("Generating short URL for {}", payload.long_url);
    let short_url = state.short_url_service.create(&payload.long_url).await?;

    Ok(Json(short_url.into()))
}
