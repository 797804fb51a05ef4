//! API route configuration.

use crate::api::handlers::{
    click_count_handler, create_short_url_handler, get_long_url_handler, redirect_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL routes, mounted under `/short_url`.
///
/// # Endpoints
///
/// - `POST /generate_short_url`         - Create (or reuse) a short code
/// - `GET  /get_long_url/{short_code}`  - Resolve without counting a click
/// - `GET  /count/{short_code}`         - Click count
/// - `GET  /{short_code}`               - Redirect and count a click
pub fn short_url_routes() -> Router<AppState> {
    Router::new()
        .route("/generate_short_url", post(create_short_url_handler))
        .route("/get_long_url/{short_code}", get(get_long_url_handler))
        .route("/count/{short_code}", get(click_count_handler))
        .route("/{short_code}", get(redirect_handler))
}
