//! Filename rules shared by the manifest builder and the viewer.
//!
//! Two concerns live here: deciding whether a directory entry is an image the
//! gallery can show, and ordering filenames the way a person reads them.
//!
//! ## Natural Ordering
//!
//! Filenames are compared with the Unicode root collation (CLDR) at primary
//! strength with numeric ordering on, the same rules a browser's
//! `localeCompare(a, b, { numeric: true, sensitivity: "base" })` applies:
//!
//! - `img2.png` sorts before `img10.png` (2 < 10, not `"1" < "2"`)
//! - `Beach.jpg` and `beach.jpg` collate equally (case-insensitive)
//! - `été.jpg` collates next to `ete.jpg` (accents ignored at this level)
//! - spaces and punctuation sort before digits, digits before letters, and
//!   punctuation follows the root order: `img 2` < `img_2` < `img-2` < `img.`
//!
//! Names that collate equally are ordered by their raw bytes, so the result is
//! a total order and a rebuild over the same directory is byte-identical.

use icu_collator::{Collator, CollatorOptions, Numeric, Strength};
use std::cmp::Ordering;
use std::path::Path;
use thiserror::Error;

/// Extensions (lower-case, without the dot) that count as gallery images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Whether `name` ends in a recognised image extension (case-insensitive).
///
/// A leading dot does not start an extension: `.jpg` is a hidden file with no
/// extension, not an image.
pub fn is_image_filename(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[derive(Error, Debug)]
pub enum NamingError {
    #[error("Collator unavailable: {0}")]
    Collator(String),
}

/// Natural filename order backed by a root-locale collator.
///
/// Build once and reuse; the collator carries its tables.
pub struct NaturalOrder {
    collator: Collator,
}

impl NaturalOrder {
    pub fn new() -> Result<Self, NamingError> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Primary);
        options.numeric = Some(Numeric::On);
        let collator = Collator::try_new(&Default::default(), options)
            .map_err(|e| NamingError::Collator(e.to_string()))?;
        Ok(Self { collator })
    }

    /// Compare two filenames in natural order.
    ///
    /// Equal collation falls back to byte order, so the result is
    /// `Ordering::Equal` only when `a == b`.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b).then_with(|| a.cmp(b))
    }

    pub fn sort(&self, names: &mut [String]) {
        names.sort_by(|a, b| self.compare(a, b));
    }
}

/// Sort filenames in place in natural order.
pub fn sort_natural(names: &mut [String]) -> Result<(), NamingError> {
    NaturalOrder::new()?.sort(names);
    Ok(())
}
