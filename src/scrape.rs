//! Client for the README-generation service.
//!
//! The service exposes a single `GET /scrape?repo_url=<url>` endpoint that
//! returns `{ "readme": "..." }` on success. Failures carry an optional
//! `{ "detail": "..." }` body whose message is shown to the user verbatim.

use serde::Deserialize;
use url::Url;

use crate::http_client;

/// Shown when the service fails without supplying a detail message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch README. Ensure the URL is correct.";

/// Upper bound on accepted response bodies.
const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
struct ScrapeResponse {
    readme: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Errors that may occur while fetching a generated README.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The service rejected the request and supplied a human-readable reason.
    #[error("{0}")]
    Service(String),
    /// The request failed at the transport or HTTP layer.
    #[error("HTTP error: {0}")]
    Http(String),
    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    InvalidBody(String),
}

impl FetchError {
    /// The exact message the form displays for this failure.
    pub fn display_message(&self) -> String {
        match self {
            Self::Service(detail) => detail.clone(),
            Self::Http(_) | Self::InvalidBody(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Fetch the generated README for `repo_url` from the service at `endpoint`.
///
/// `repo_url` is passed along verbatim; the service is trusted to reject
/// malformed input.
pub fn fetch_readme(endpoint: &Url, repo_url: &str) -> Result<String, FetchError> {
    let url = endpoint
        .join("scrape")
        .map_err(|err| FetchError::Http(err.to_string()))?;
    let response = match http_client::agent()
        .get(url.as_str())
        .query("repo_url", repo_url)
        .call()
    {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            return Err(status_error(code, response));
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(FetchError::Http(err.to_string()));
        }
    };

    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| FetchError::Http(err.to_string()))?;
    let parsed: ScrapeResponse = serde_json::from_slice(&bytes)
        .map_err(|err| FetchError::InvalidBody(err.to_string()))?;
    Ok(parsed.readme)
}

fn status_error(code: u16, response: ureq::Response) -> FetchError {
    let body = response.into_string().unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .unwrap_or_default()
        .detail;
    match detail {
        Some(detail) => FetchError::Service(detail),
        None => FetchError::Http(format!("HTTP {code}: {body}")),
    }
}
