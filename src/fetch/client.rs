use reqwest::Client;
use std::time::Duration;

/// User agent sent with every request
const USER_AGENT: &str = concat!("gridsweep/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with proper configuration
///
/// The request timeout sits below the engine's per-task deadline so a hung
/// connection surfaces as a fetch error rather than a task timeout.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
