//! The presentational state the viewer maintains.
//!
//! These structs stand in for the page's DOM: the gallery container, the
//! lightbox overlay and the scroll lock on the page body. The state machine
//! writes them; [`crate::render`] turns them into HTML.

/// Everything the viewer shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub gallery: GalleryView,
    pub overlay: OverlayView,
    /// Page scrolling is disabled while the lightbox is showing.
    pub scroll_locked: bool,
}

/// Contents of the gallery container.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GalleryView {
    /// The manifest fetch has not completed yet.
    #[default]
    Loading,
    /// One thumbnail per manifest entry, in manifest order.
    Ready(Vec<Thumbnail>),
    /// The manifest could not be fetched or parsed; shown inline.
    Failed { manifest_url: String },
}

impl GalleryView {
    pub fn thumbnails(&self) -> &[Thumbnail] {
        match self {
            GalleryView::Ready(thumbnails) => thumbnails,
            _ => &[],
        }
    }
}

/// A clickable preview of one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    /// Escaped `basePath + filename`.
    pub src: String,
    /// The raw filename.
    pub alt: String,
    /// `Open image N`, 1-based.
    pub aria_label: String,
    /// Deferred loading hint; the browser fetches near the viewport.
    pub lazy: bool,
}

/// The lightbox overlay.
///
/// `open`, `visible` and `closing` mirror the `is-open`, `is-visible` and
/// `is-closing` classes the stylesheet animates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub open: bool,
    pub visible: bool,
    pub closing: bool,
    pub aria_hidden: bool,
    pub image_src: String,
    pub image_alt: String,
    pub caption: String,
    pub prev_hidden: bool,
    pub next_hidden: bool,
}

impl Default for OverlayView {
    fn default() -> Self {
        Self {
            open: false,
            visible: false,
            closing: false,
            aria_hidden: true,
            image_src: String::new(),
            image_alt: String::new(),
            caption: String::new(),
            prev_hidden: false,
            next_hidden: false,
        }
    }
}
