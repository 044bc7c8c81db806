use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;

use crate::error::TtsError;

/// Connection pool client shared by buffered and streaming upstream calls
///
/// No total request timeout is set here; streaming relays stay open for as
/// long as upstream keeps sending. Buffered calls apply their own per-request
/// timeout.
pub(crate) fn build_client() -> crate::error::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .map_err(|e| TtsError::Config(format!("failed to build HTTP client: {e}")))
}
