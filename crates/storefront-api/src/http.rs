use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

const USER_AGENT_VALUE: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client used by every remote source.
///
/// The timeout is the only transport policy we apply - there is no retry
/// layer, a failed request surfaces straight to the caller.
pub fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Drain a failed response into a short "Status N: body" message
pub(crate) async fn describe_failure(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("Status {}: {}", status, body)
}
