//! CLI output formatting for the builder and the viewer.
//!
//! # Output Format
//!
//! ## Manifest
//!
//! ```text
//! Wrote assets/tole/manifest.json with 3 images.
//! ```
//!
//! ## View
//!
//! The gallery as loaded, then one snapshot line per script step showing the
//! virtual time, the step and the resulting lightbox state:
//!
//! ```text
//! Gallery ./assets/tole/manifest.json (3 images)
//!     001 img1.jpg
//!     002 img2.jpg
//!     003 img10.jpg
//!
//!    0ms  click thumb 1        open 2/3 img2.jpg
//!    0ms  key ArrowRight       open 3/3 img10.jpg
//!    0ms  key Escape           closing 3/3 img10.jpg
//!  160ms  wait 160             closed
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::scan::BuildSummary;
use crate::viewer::{EventLoop, GalleryView, Lightbox, LoadError, Viewer};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Manifest
// ============================================================================

pub fn format_build_summary(summary: &BuildSummary) -> String {
    format!(
        "Wrote {} with {} images.",
        summary.manifest_path.display(),
        summary.image_count
    )
}

pub fn print_build_summary(summary: &BuildSummary) {
    println!("{}", format_build_summary(summary));
}

// ============================================================================
// View
// ============================================================================

/// Format the outcome of [`Viewer::load`]: the thumbnail list on success, the
/// inline error text otherwise.
pub fn format_load_result(viewer: &Viewer, result: &Result<usize, LoadError>) -> Vec<String> {
    let url = &viewer.options().manifest_url;
    let mut lines = Vec::new();

    match (result, &viewer.document().gallery) {
        (Ok(count), GalleryView::Ready(thumbnails)) => {
            lines.push(format!("Gallery {url} ({count} images)"));
            for thumb in thumbnails {
                lines.push(format!(
                    "{}{} {}",
                    indent(1),
                    format_index(thumb.index + 1),
                    thumb.alt
                ));
            }
        }
        (Err(e), _) => {
            lines.push(format!("Could not load {url}."));
            lines.push(format!("{}{e}", indent(1)));
        }
        (Ok(_), _) => lines.push(format!("Gallery {url} (not loaded)")),
    }

    lines
}

pub fn print_load_result(viewer: &Viewer, result: &Result<usize, LoadError>) {
    for line in format_load_result(viewer, result) {
        println!("{}", line);
    }
}

/// Describe the lightbox: `closed`, or `<state> <n>/<total> <filename>`.
pub fn format_state(viewer: &Viewer) -> String {
    let state = viewer.state();
    let label = match state.lightbox() {
        Lightbox::Closed => return "closed".to_string(),
        Lightbox::Opening => "opening",
        Lightbox::Open => "open",
        Lightbox::Closing => "closing",
    };
    let index = state.current_index().unwrap_or_default();
    let filename = state.images().get(index).map(String::as_str).unwrap_or("");
    format!("{label} {}/{} {filename}", index + 1, state.images().len())
}

/// One snapshot line after a script step.
pub fn format_step(step: &str, event_loop: &EventLoop) -> String {
    format!(
        "{:>5}ms  {:<20} {}",
        event_loop.now().as_millis(),
        step,
        format_state(event_loop.viewer())
    )
}

pub fn print_step(step: &str, event_loop: &EventLoop) {
    println!("{}", format_step(step, event_loop));
}
