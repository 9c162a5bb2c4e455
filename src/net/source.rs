//! Where the fetch adapter gets page HTML from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

use super::fetch::{fetch_url, FetchError, FetchResult};

/// Page loader run on the adapter's worker thread.
pub trait PageSource: Send + Sync {
    fn load(&self, url: &Url) -> Result<FetchResult, FetchError>;
}

/// Live site over HTTP(S).
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSource;

impl PageSource for HttpSource {
    fn load(&self, url: &Url) -> Result<FetchResult, FetchError> {
        fetch_url(url)
    }
}

/// A built site on disk (`_site/`), served the way a static host would:
/// `/about/` maps to `about/index.html`, `/about` to `about.html` or
/// `about/index.html`, and misses get the root `404.html` with status 404.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, url: &Url) -> Vec<PathBuf> {
        let rel: PathBuf = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty() && *s != "..")
                    .collect()
            })
            .unwrap_or_default();
        let base = self.root.join(&rel);
        if url.path().ends_with('/') {
            vec![base.join("index.html")]
        } else {
            vec![
                base.clone(),
                base.with_extension("html"),
                base.join("index.html"),
            ]
        }
    }
}

impl PageSource for DirectorySource {
    fn load(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let (path, status) = match self.candidates(url).into_iter().find(|p| p.is_file()) {
            Some(path) => (path, 200),
            None => {
                let not_found = self.root.join("404.html");
                if !not_found.is_file() {
                    return Err(FetchError::NotFound(url.to_string()));
                }
                log::debug!("{url} not in {}, serving 404.html", self.root.display());
                (not_found, 404)
            }
        };
        let html = std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(FetchResult {
            html,
            url: url.clone(),
            status,
            content_type: "text/html".to_string(),
        })
    }
}

/// Pages held in memory, keyed by URL path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    not_found: Option<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(path.into(), html.into());
        self
    }

    /// Page served with status 404 for any unknown path.
    pub fn with_not_found(mut self, html: impl Into<String>) -> Self {
        self.not_found = Some(html.into());
        self
    }
}

impl PageSource for MemorySource {
    fn load(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let (html, status) = match (self.pages.get(url.path()), &self.not_found) {
            (Some(html), _) => (html, 200),
            (None, Some(html)) => (html, 404),
            (None, None) => return Err(FetchError::NotFound(url.to_string())),
        };
        Ok(FetchResult {
            html: html.clone(),
            url: url.clone(),
            status,
            content_type: "text/html".to_string(),
        })
    }
}
