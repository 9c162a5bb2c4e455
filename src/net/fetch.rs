use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Result of fetching a URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    pub url: Url,
    pub status: u16,
    pub content_type: String,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported scheme {0:?}")]
    Scheme(String),
    #[error("client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fetch a page over HTTP(S) (blocking).
///
/// Non-2xx responses are returned, not turned into errors; callers decide
/// whether a 404 page is usable.
pub fn fetch_url(url: &Url) -> Result<FetchResult, FetchError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::Scheme(url.scheme().to_string()));
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(
            "Mozilla/5.0 (compatible; wordplay-header/",
            env!("CARGO_PKG_VERSION"),
            ")"
        ))
        .timeout(Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en,he;q=0.9")
        .send()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let final_url = response.url().clone();
    let html = response.text().map_err(FetchError::Body)?;

    log::debug!("fetched {final_url} ({status}, {} bytes)", html.len());
    Ok(FetchResult {
        html,
        url: final_url,
        status,
        content_type,
    })
}
