//! HTTP client construction.
//!
//! A fresh client is built for every request and keeps no idle
//! connections, so each exchange owns its connection from send to the end
//! of the body.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};

use crate::client::ClientError;
use crate::options::HttpTransport;

/// Build a configured HTTP client from transport options.
///
/// # Example
/// ```ignore
/// let client = build_http_client(&transport)?;
/// ```
pub fn build_http_client(transport: &HttpTransport) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().pool_max_idle_per_host(0);

    if let Some(timeout) = transport.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Start a JSON POST to `{base_url}{path}` with bearer authentication.
pub fn authorized_post(transport: &HttpTransport, path: &str) -> Result<RequestBuilder, ClientError> {
    let url = format!("{}{}", transport.base_url, path);
    let http_client = build_http_client(transport)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", transport.api_key.expose_secret()))
            .map_err(|_| ClientError::Config("API key contains invalid characters".to_string()))?,
    );

    Ok(http_client.post(url).headers(headers))
}
