//! Shared test utilities for the lightbox-gal test suite.
//!
//! Provides filesystem fixtures for the builder and canned manifest sources
//! plus pre-loaded event loops for the viewer.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project(&["b.jpg", "a.jpg"]);
//! let summary = scan::run(&ProjectConfig::default(), tmp.path()).unwrap();
//! assert_eq!(read_manifest(&summary.manifest_path).images, vec!["a.jpg", "b.jpg"]);
//!
//! let mut el = open_at(&["a.jpg", "b.jpg"], 0);
//! el.dispatch(Event::KeyDown(Key::ArrowRight));
//! assert_eq!(el.viewer().current_index(), Some(1));
//! ```

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::ProjectConfig;
use crate::types::{Manifest, parse_manifest};
use crate::viewer::{
    CachePolicy, ClickTarget, Event, EventLoop, FetchError, FetchResponse, ManifestSource, Viewer,
    ViewerOptions,
};

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Create empty files named `names` inside `dir`.
pub fn touch_files(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"").unwrap();
    }
}

/// A project root with the default gallery directory holding `names`.
pub fn setup_project(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = ProjectConfig::default().gallery_dir(tmp.path());
    fs::create_dir_all(&dir).unwrap();
    touch_files(&dir, names);
    tmp
}

pub fn read_manifest(path: &Path) -> Manifest {
    let body = fs::read_to_string(path).unwrap();
    parse_manifest(&body, "").unwrap()
}

// =========================================================================
// Manifest sources
// =========================================================================

/// Answers every fetch with the same canned result and records requests.
pub struct MemorySource {
    response: Option<FetchResponse>,
    requests: RefCell<Vec<(String, CachePolicy)>>,
}

impl MemorySource {
    fn new(response: Option<FetchResponse>) -> Self {
        Self {
            response,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// A structured manifest with `base_path` and `images`.
    pub fn manifest(base_path: &str, images: &[&str]) -> Self {
        let manifest = Manifest {
            base_path: base_path.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        };
        Self::body(&manifest.to_json().unwrap())
    }

    /// A 200 response with an arbitrary body.
    pub fn body(body: &str) -> Self {
        Self::new(Some(FetchResponse::ok(body)))
    }

    pub fn status(status: u16) -> Self {
        Self::new(Some(FetchResponse {
            status,
            body: String::new(),
        }))
    }

    /// Every fetch fails before a response arrives.
    pub fn failing() -> Self {
        Self::new(None)
    }

    pub fn requests(&self) -> Vec<(String, CachePolicy)> {
        self.requests.borrow().clone()
    }
}

impl ManifestSource for MemorySource {
    fn fetch(&self, url: &str, cache: CachePolicy) -> Result<FetchResponse, FetchError> {
        self.requests.borrow_mut().push((url.to_string(), cache));
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

// =========================================================================
// Viewer fixtures
// =========================================================================

/// An idle event loop around a viewer loaded with `images`.
pub fn loaded_loop(images: &[&str]) -> EventLoop {
    loaded_loop_with(ViewerOptions::default(), images)
}

pub fn loaded_loop_with(options: ViewerOptions, images: &[&str]) -> EventLoop {
    let base_path = options.default_base_path.clone();
    let mut viewer = Viewer::new(options);
    viewer
        .load(&MemorySource::manifest(&base_path, images))
        .unwrap();
    EventLoop::new(viewer)
}

/// A loaded viewer with the lightbox fully open at `index`.
pub fn open_at(images: &[&str], index: usize) -> EventLoop {
    let mut el = loaded_loop(images);
    el.dispatch(Event::Click(ClickTarget::Thumbnail(index)));
    el.run_frame();
    el
}
