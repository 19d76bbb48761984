pub mod auth;
pub mod books;
pub mod reading_logs;

/// Health check endpoint.
#[must_use]
#[allow(clippy::unused_async)]
pub async fn health_check() -> &'static str {
    "OK"
}
