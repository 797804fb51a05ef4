//! HTTP request handlers for API endpoints.

pub mod click_count;
pub mod health;
pub mod long_url;
pub mod redirect;
pub mod shorten;

pub use click_count::click_count_handler;
pub use health::health_handler;
pub use long_url::get_long_url_handler;
pub use redirect::redirect_handler;
pub use shorten::create_short_url_handler;
