//! Handler for click count lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::short_url::ClickCountResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns how many redirects a short code has served.
///
/// # Endpoint
///
/// `GET /short_url/count/{short_code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn click_count_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ClickCountResponse>, AppError> {
    let click_count = state.short_url_service.get_click_count(&short_code).await?;

    Ok(Json(ClickCountResponse { click_count }))
}
