//! Where the viewer gets its manifest from.
//!
//! The fetch is the viewer's only suspension point. It is modelled as a
//! trait so the same load logic runs against a site directory on disk
//! ([`FsSource`]) or a canned response in tests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),
}

/// Cache behaviour requested for a fetch, as in `fetch(url, { cache })`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Default,
    /// Never answer from a cached copy, so a rebuilt manifest is seen at once.
    NoStore,
}

/// A completed HTTP-style exchange. Non-2xx statuses are still responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: "Not Found".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ManifestSource {
    fn fetch(&self, url: &str, cache: CachePolicy) -> Result<FetchResponse, FetchError>;
}

/// Serves site-relative URLs (`./assets/tole/manifest.json`) from a directory.
///
/// Reads go straight to disk, so every policy behaves like `NoStore`.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, FetchError> {
        if url.contains("://") {
            return Err(FetchError::UnsupportedUrl(url.to_string()));
        }
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let rel = Path::new(path.trim_start_matches('/'));

        let mut resolved = self.root.clone();
        for component in rel.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) => resolved.push(part),
                _ => return Err(FetchError::UnsupportedUrl(url.to_string())),
            }
        }
        Ok(resolved)
    }
}

impl ManifestSource for FsSource {
    fn fetch(&self, url: &str, cache: CachePolicy) -> Result<FetchResponse, FetchError> {
        let path = self.resolve(url)?;
        log::debug!("fetch {url} ({cache:?}) -> {}", path.display());
        match fs::read_to_string(&path) {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
