//! HTML rendering of the viewer's document with [Maud](https://maud.lambda.xyz/).
//!
//! The markup mirrors the page the stylesheet targets: a `#gallery` grid of
//! thumbnail buttons and a `#lightbox` overlay whose `is-open`, `is-visible`
//! and `is-closing` classes drive the transitions. All interpolation is
//! escaped by Maud; image URLs are additionally passed through
//! [`encode_uri`] before they reach the view model.

use crate::viewer::{Document, GalleryView, OverlayView};
use maud::{DOCTYPE, Markup, html};

/// Characters left as-is besides ASCII alphanumerics: the unreserved and
/// reserved URI sets, plus `#`.
const URI_SAFE: &[u8] = b";,/?:@&=+$-_.!~*'()#";

/// Percent-encode everything outside the URI-safe set, byte by byte.
///
/// Already-encoded sequences are not recognised, so `%` itself is encoded:
/// `"a%20b"` → `"a%2520b"`.
pub fn encode_uri(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &byte in s.as_bytes() {
        if byte.is_ascii_alphanumeric() || URI_SAFE.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

// ============================================================================
// Components
// ============================================================================

/// Contents of the gallery container: thumbnails, the inline error, or
/// nothing while loading.
pub fn render_gallery(gallery: &GalleryView) -> Markup {
    html! {
        div #gallery.gallery {
            @match gallery {
                GalleryView::Loading => {}
                GalleryView::Ready(thumbnails) => {
                    @for thumb in thumbnails {
                        button.thumb type="button" aria-label=(thumb.aria_label) data-index=(thumb.index) {
                            span.thumb__frame {
                                img.thumb__img src=(thumb.src) alt=(thumb.alt)
                                    loading=[thumb.lazy.then_some("lazy")];
                            }
                        }
                    }
                }
                GalleryView::Failed { manifest_url } => {
                    p.gallery__error style="color:#b00020" {
                        "Could not load " code { (manifest_url) } "."
                    }
                }
            }
        }
    }
}

pub fn render_overlay(overlay: &OverlayView) -> Markup {
    let aria_hidden = if overlay.aria_hidden { "true" } else { "false" };
    html! {
        div #lightbox.lightbox
            .is-open[overlay.open]
            .is-visible[overlay.visible]
            .is-closing[overlay.closing]
            aria-hidden=(aria_hidden)
        {
            div.lightbox__dialog role="dialog" aria-modal="true" {
                button.lightbox__close type="button" aria-label="Close" data-close { "×" }
                button #prevBtn.lightbox__nav."lightbox__nav--prev".is-hidden[overlay.prev_hidden]
                    type="button" aria-label="Previous image" { "‹" }
                figure.lightbox__figure {
                    img #lightboxImg.lightbox__img src=(overlay.image_src) alt=(overlay.image_alt);
                    figcaption #lightboxCaption.lightbox__caption { (overlay.caption) }
                }
                button #nextBtn.lightbox__nav."lightbox__nav--next".is-hidden[overlay.next_hidden]
                    type="button" aria-label="Next image" { "›" }
            }
        }
    }
}

/// The whole page for a document snapshot.
pub fn render_document(document: &Document) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Gallery" }
            }
            body class=[document.scroll_locked.then_some("viewer-open")] {
                main {
                    (render_gallery(&document.gallery))
                }
                (render_overlay(&document.overlay))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::Thumbnail;

    fn thumb(index: usize, name: &str) -> Thumbnail {
        Thumbnail {
            index,
            src: encode_uri(&format!("./assets/tole/{name}")),
            alt: name.to_string(),
            aria_label: format!("Open image {}", index + 1),
            lazy: true,
        }
    }

    // =========================================================================
    // encode_uri
    // =========================================================================

    #[test]
    fn encode_uri_keeps_url_structure() {
        assert_eq!(
            encode_uri("./assets/tole/img-1_a.b~c.jpg?x=1&y=2#top"),
            "./assets/tole/img-1_a.b~c.jpg?x=1&y=2#top"
        );
        assert_eq!(encode_uri("(1)!*'.png"), "(1)!*'.png");
    }

    #[test]
    fn encode_uri_escapes_spaces_and_unicode() {
        assert_eq!(encode_uri("my photo.jpg"), "my%20photo.jpg");
        assert_eq!(encode_uri("café.png"), "caf%C3%A9.png");
        assert_eq!(encode_uri("a%20b"), "a%2520b");
        assert_eq!(encode_uri("<\"x\">"), "%3C%22x%22%3E");
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    #[test]
    fn gallery_renders_thumbnail_buttons() {
        let html = render_gallery(&GalleryView::Ready(vec![thumb(0, "a.jpg"), thumb(1, "b c.jpg")]))
            .into_string();
        assert_eq!(html.matches("class=\"thumb\"").count(), 2);
        assert!(html.contains("aria-label=\"Open image 2\""));
        assert!(html.contains("data-index=\"1\""));
        assert!(html.contains("src=\"./assets/tole/b%20c.jpg\""));
        assert!(html.contains("alt=\"b c.jpg\""));
        assert!(html.contains("loading=\"lazy\""));
        assert!(html.contains("class=\"thumb__frame\""));
    }

    #[test]
    fn gallery_escapes_filenames_in_alt_text() {
        let html =
            render_gallery(&GalleryView::Ready(vec![thumb(0, "<b>&.png")])).into_string();
        assert!(html.contains("alt=\"&lt;b&gt;&amp;.png\""));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn failed_gallery_names_the_manifest_url() {
        let html = render_gallery(&GalleryView::Failed {
            manifest_url: "./assets/tole/manifest.json".to_string(),
        })
        .into_string();
        assert!(html.contains("Could not load <code>./assets/tole/manifest.json</code>."));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn loading_gallery_is_empty() {
        let html = render_gallery(&GalleryView::Loading).into_string();
        assert!(html.contains("id=\"gallery\""));
        assert!(!html.contains("<button"));
        assert!(!html.contains("<p"));
    }

    // =========================================================================
    // Overlay
    // =========================================================================

    #[test]
    fn closed_overlay_is_hidden() {
        let html = render_overlay(&OverlayView::default()).into_string();
        assert!(html.contains("class=\"lightbox\""));
        assert!(html.contains("aria-hidden=\"true\""));
        assert!(!html.contains("is-open"));
    }

    #[test]
    fn open_overlay_carries_state_classes() {
        let overlay = OverlayView {
            open: true,
            visible: true,
            aria_hidden: false,
            image_src: "./assets/tole/a.jpg".to_string(),
            image_alt: "a.jpg".to_string(),
            caption: "a.jpg".to_string(),
            prev_hidden: true,
            ..OverlayView::default()
        };
        let html = render_overlay(&overlay).into_string();
        assert!(html.contains("class=\"lightbox is-open is-visible\""));
        assert!(html.contains("aria-hidden=\"false\""));
        assert!(html.contains("id=\"lightboxImg\""));
        assert!(html.contains("src=\"./assets/tole/a.jpg\""));
        assert!(html.contains("id=\"lightboxCaption\""));
        assert!(html.contains(">a.jpg</figcaption>"));
        assert!(html.contains("class=\"lightbox__nav lightbox__nav--prev is-hidden\""));
        assert!(html.contains("class=\"lightbox__nav lightbox__nav--next\""));
        assert!(html.contains("data-close"));
    }

    #[test]
    fn closing_overlay_keeps_open_class() {
        let overlay = OverlayView {
            open: true,
            closing: true,
            ..OverlayView::default()
        };
        let html = render_overlay(&overlay).into_string();
        assert!(html.contains("class=\"lightbox is-open is-closing\""));
    }

    // =========================================================================
    // Document
    // =========================================================================

    #[test]
    fn document_locks_scroll_on_body() {
        let mut doc = Document::default();
        let html = render_document(&doc).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body>"));

        doc.scroll_locked = true;
        let html = render_document(&doc).into_string();
        assert!(html.contains("<body class=\"viewer-open\">"));
    }
}
