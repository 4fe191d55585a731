//! Gallery viewer: manifest loading and the lightbox state machine.
//!
//! ## Lifecycle
//!
//! A [`Viewer`] is created empty, loads the manifest exactly once with
//! [`Viewer::load`], then only changes in response to events delivered by an
//! [`EventLoop`]. There is no teardown.
//!
//! ## Lightbox States
//!
//! ```text
//!            open(i)                 frame
//!  Closed ──────────▶ Opening ─────────────▶ Open ◀──┐ prev / next
//!    ▲                  │  ▲                  │  └──┘ (clamped)
//!    │ timer            │  │ open(i)          │ close
//!    │                  ▼  │                  ▼
//!    └──────────────── Closing ◀──────────────┘
//! ```
//!
//! - `open` renders the image, marks the overlay open and schedules the
//!   visible state for the next animation frame, so the entry transition
//!   starts from a rendered open state even when re-opening rapidly.
//! - `close` hides the overlay from assistive tech and drops the visible state
//!   at once, keeping the open state until the exit transition is over
//!   ([`CLOSE_TRANSITION`], or zero with reduced motion).
//!
//! Every transition bumps a generation counter. Deferred tasks carry the
//! generation they were scheduled under and are dropped if it has moved on,
//! so a re-open during `Closing` never gets torn down by the old timer.

pub mod event;
pub mod script;
pub mod source;
pub mod view;

pub use event::{ClickTarget, Event, EventLoop, Key, Scheduler, Task};
pub use source::{CachePolicy, FetchError, FetchResponse, FsSource, ManifestSource};
pub use view::{Document, GalleryView, OverlayView, Thumbnail};

use crate::config::ProjectConfig;
use crate::render::encode_uri;
use crate::types::{Manifest, ManifestError, parse_manifest};
use std::time::Duration;
use thiserror::Error;

/// Exit transition length when motion is not reduced.
pub const CLOSE_TRANSITION: Duration = Duration::from_millis(160);

/// Minimum horizontal travel, in CSS pixels, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 40.0;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Manifest fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Manifest fetch failed: {0}")]
    Status(u16),
    #[error("Manifest parse failed: {0}")]
    Parse(#[from] ManifestError),
    #[error("Manifest already loaded")]
    AlreadyLoaded,
}

/// Presentational sub-state of the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Data the lightbox navigates over.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    images: Vec<String>,
    base_path: String,
    current: usize,
    lightbox: Lightbox,
    generation: u64,
}

impl ViewerState {
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    /// Index being shown, or `None` when the lightbox is fully closed.
    pub fn current_index(&self) -> Option<usize> {
        match self.lightbox {
            Lightbox::Closed => None,
            _ => Some(self.current),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub manifest_url: String,
    /// Used when the manifest does not name its own base path.
    pub default_base_path: String,
    pub reduced_motion: bool,
}

impl ViewerOptions {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            manifest_url: config.manifest_url(),
            default_base_path: config.base_path(),
            reduced_motion: config.viewer.reduced_motion,
        }
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self::from_config(&ProjectConfig::default())
    }
}

#[derive(Debug)]
pub struct Viewer {
    options: ViewerOptions,
    state: ViewerState,
    document: Document,
    touch_start: Option<f64>,
    loaded: bool,
}

impl Viewer {
    pub fn new(options: ViewerOptions) -> Self {
        let state = ViewerState {
            base_path: options.default_base_path.clone(),
            ..ViewerState::default()
        };
        Self {
            options,
            state,
            document: Document::default(),
            touch_start: None,
            loaded: false,
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    fn is_showing(&self) -> bool {
        matches!(self.state.lightbox, Lightbox::Opening | Lightbox::Open)
    }

    // ------------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------------

    /// Fetch the manifest (bypassing caches) and build the thumbnail grid.
    ///
    /// On failure the gallery shows an inline error naming the manifest URL
    /// and stays empty; the error is also returned. Nothing is retried.
    pub fn load(&mut self, source: &dyn ManifestSource) -> Result<usize, LoadError> {
        if self.loaded {
            return Err(LoadError::AlreadyLoaded);
        }
        self.loaded = true;

        match self.fetch_manifest(source) {
            Ok(manifest) => {
                self.state.images = manifest.images;
                self.state.base_path = manifest.base_path;
                let thumbnails = self.build_thumbnails();
                let count = thumbnails.len();
                self.document.gallery = GalleryView::Ready(thumbnails);
                log::info!("gallery ready with {count} images");
                Ok(count)
            }
            Err(e) => {
                log::error!("{e}");
                self.document.gallery = GalleryView::Failed {
                    manifest_url: self.options.manifest_url.clone(),
                };
                Err(e)
            }
        }
    }

    fn fetch_manifest(&self, source: &dyn ManifestSource) -> Result<Manifest, LoadError> {
        let response = source.fetch(&self.options.manifest_url, CachePolicy::NoStore)?;
        if !response.is_success() {
            return Err(LoadError::Status(response.status));
        }
        Ok(parse_manifest(
            &response.body,
            &self.options.default_base_path,
        )?)
    }

    fn build_thumbnails(&self) -> Vec<Thumbnail> {
        self.state
            .images
            .iter()
            .enumerate()
            .map(|(index, filename)| Thumbnail {
                index,
                src: encode_uri(&format!("{}{}", self.state.base_path, filename)),
                alt: filename.clone(),
                aria_label: format!("Open image {}", index + 1),
                lazy: true,
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Show the image at `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize, scheduler: &mut Scheduler) {
        if index >= self.state.images.len() {
            log::debug!("open({index}) ignored, {} images", self.state.images.len());
            return;
        }
        self.state.current = index;
        self.render_current();

        self.document.scroll_locked = true;
        let overlay = &mut self.document.overlay;
        overlay.closing = false;
        overlay.open = true;
        // Dropped and re-added on the next frame so the entry transition restarts
        overlay.visible = false;
        overlay.aria_hidden = false;

        self.state.generation += 1;
        self.state.lightbox = Lightbox::Opening;
        scheduler.request_animation_frame(Task::Reveal {
            generation: self.state.generation,
        });
    }

    /// Begin closing. Only acts while the lightbox is opening or open.
    pub fn close(&mut self, scheduler: &mut Scheduler) {
        if !self.is_showing() {
            return;
        }
        self.document.scroll_locked = false;
        let overlay = &mut self.document.overlay;
        overlay.closing = true;
        overlay.visible = false;
        overlay.aria_hidden = true;

        self.state.generation += 1;
        self.state.lightbox = Lightbox::Closing;
        let delay = if self.options.reduced_motion {
            Duration::ZERO
        } else {
            CLOSE_TRANSITION
        };
        scheduler.set_timeout(
            delay,
            Task::FinishClose {
                generation: self.state.generation,
            },
        );
    }

    /// Step back one image, stopping at the first.
    pub fn prev(&mut self) {
        if !self.is_showing() || self.state.current == 0 {
            return;
        }
        self.state.current -= 1;
        self.render_current();
    }

    /// Step forward one image, stopping at the last.
    pub fn next(&mut self) {
        if !self.is_showing() || self.state.current + 1 >= self.state.images.len() {
            return;
        }
        self.state.current += 1;
        self.render_current();
    }

    fn render_current(&mut self) {
        let Some(filename) = self.state.images.get(self.state.current) else {
            return;
        };
        let last = self.state.images.len() - 1;
        let overlay = &mut self.document.overlay;
        overlay.image_src = encode_uri(&format!("{}{}", self.state.base_path, filename));
        overlay.image_alt = filename.clone();
        overlay.caption = filename.clone();
        overlay.prev_hidden = self.state.current == 0;
        overlay.next_hidden = self.state.current == last;
    }

    // ------------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------------

    /// Apply one input event.
    pub fn handle(&mut self, event: Event, scheduler: &mut Scheduler) {
        match event {
            Event::Click(target) => match target {
                ClickTarget::Thumbnail(index) => self.open(index, scheduler),
                ClickTarget::Prev => self.prev(),
                ClickTarget::Next => self.next(),
                ClickTarget::Close | ClickTarget::Backdrop => self.close(scheduler),
                ClickTarget::Dialog => {}
            },
            Event::KeyDown(key) => {
                if !self.is_showing() {
                    return;
                }
                match key {
                    Key::Escape => self.close(scheduler),
                    Key::ArrowLeft => self.prev(),
                    Key::ArrowRight => self.next(),
                    Key::Other(_) => {}
                }
            }
            Event::TouchStart { x } => self.touch_start = Some(x),
            Event::TouchEnd { x } => {
                let Some(start) = self.touch_start.take() else {
                    return;
                };
                if !self.is_showing() {
                    return;
                }
                let dx = x - start;
                if !dx.is_finite() || dx.abs() < SWIPE_THRESHOLD {
                    return;
                }
                if dx > 0.0 {
                    self.prev();
                } else {
                    self.next();
                }
            }
        }
    }

    /// Run a deferred task, unless a later transition made it stale.
    pub(crate) fn run_task(&mut self, task: Task) {
        match task {
            Task::Reveal { generation }
                if generation == self.state.generation
                    && self.state.lightbox == Lightbox::Opening =>
            {
                self.document.overlay.visible = true;
                self.state.lightbox = Lightbox::Open;
            }
            Task::FinishClose { generation }
                if generation == self.state.generation
                    && self.state.lightbox == Lightbox::Closing =>
            {
                self.document.overlay.open = false;
                self.document.overlay.closing = false;
                self.state.lightbox = Lightbox::Closed;
            }
            stale => log::trace!("dropping stale {stale:?}"),
        }
    }
}
