//! # Lightbox Gal
//!
//! A static image gallery in two halves that share one file. A build step
//! lists a flat directory of images into `manifest.json`; a viewer loads that
//! manifest, shows a thumbnail grid, and opens any image in a lightbox with
//! keyboard, click and swipe navigation.
//!
//! # Architecture: Builder → Manifest → Viewer
//!
//! ```text
//! 1. Build   assets/tole/*.jpg  →  assets/tole/manifest.json
//! 2. View    manifest.json      →  thumbnails + lightbox state machine
//! ```
//!
//! The manifest is the only contract between the two. The builder never
//! renders anything and the viewer never touches the image directory, so
//! each side is tested on its own: the builder against temp directories, the
//! viewer against canned manifests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Builder: lists the gallery directory and writes the manifest |
//! | [`naming`] | Image extension filter and natural filename ordering |
//! | [`types`] | The [`types::Manifest`] and its backward-compatible parser |
//! | [`viewer`] | Manifest loading, lightbox state machine, event loop, scripted sessions |
//! | [`render`] | Maud rendering of the viewer's document, URI encoding |
//! | [`config`] | Optional `gallery.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Headless Viewer
//!
//! The viewer is modelled without a browser. Its DOM is a plain view model
//! ([`viewer::Document`]), and animation frames and timers come from an
//! explicit [`viewer::EventLoop`] with a virtual clock. Every transition is
//! therefore deterministic and can be replayed from a script:
//!
//! ```text
//! click thumb 2
//! key ArrowRight
//! key Escape
//! wait 160
//! ```
//!
//! ## Natural Ordering
//!
//! Filenames are ordered the way a person reads them: `img2` before `img10`,
//! case and accents ignored, with raw byte order breaking ties so the order
//! is total. Rebuilding an unchanged directory yields a byte-identical
//! manifest. See [`naming::NaturalOrder`].
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error and every interpolated
//! filename is escaped.

pub mod config;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
