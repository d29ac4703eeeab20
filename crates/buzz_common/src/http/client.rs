use buzz_config::FetchConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::BuzzError;

/// Creates an HTTP client from the fetch configuration.
///
/// The client follows redirects and sends the configured user agent; the
/// booking site rejects requests without a browser-like one.
pub fn create_client(config: &FetchConfig) -> Result<Client, BuzzError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(BuzzError::from)
}

/// GETs `url` and returns the body as text.
///
/// Non-success status codes are reported as [`BuzzError::HttpError`].
pub async fn get_text(client: &Client, url: &str) -> Result<String, BuzzError> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BuzzError::HttpError(format!("{} returned {}", url, status)));
    }
    let body = response.text().await?;
    debug!("Received {} bytes from {}", body.len(), url);
    Ok(body)
}
