//! Manifest builder.
//!
//! Reads one gallery directory and produces the [`Manifest`] the viewer
//! loads. The directory is flat: only its direct entries are considered.
//!
//! ```text
//! assets/tole/
//! ├── manifest.json      # Written here (overwritten on every build)
//! ├── img1.jpg           # Kept
//! ├── img2.PNG           # Kept (extension match ignores case)
//! ├── img10.webp         # Kept, sorted after img2
//! ├── notes.txt          # Ignored
//! └── raw/               # Ignored, subdirectories are never walked
//! ```
//!
//! Output is deterministic: the same directory contents always produce the
//! same bytes, because ordering is a total natural order (see
//! [`crate::naming`]) and serialization order is fixed.

use crate::config::{MANIFEST_FILE, ProjectConfig};
use crate::naming::{NamingError, is_image_filename, sort_natural};
use crate::types::Manifest;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Folder not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Naming error: {0}")]
    Naming(#[from] NamingError),
}

/// Result of a full build: where the manifest went and how many images it lists.
#[derive(Debug)]
pub struct BuildSummary {
    pub manifest_path: PathBuf,
    pub image_count: usize,
}

/// Build the manifest for `dir` without writing it.
pub fn build(dir: &Path, base_path: &str) -> Result<Manifest, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut images = collect_images(dir)?;
    sort_natural(&mut images)?;
    log::debug!("{} images in {}", images.len(), dir.display());

    Ok(Manifest {
        base_path: base_path.to_string(),
        images,
    })
}

fn collect_images(dir: &Path) -> Result<Vec<String>, ScanError> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, so a linked image counts and a linked directory doesn't
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("skipping non UTF-8 filename {:?}", entry.file_name());
            continue;
        };
        if is_image_filename(&name) {
            images.push(name);
        } else {
            log::trace!("ignoring {name}");
        }
    }
    Ok(images)
}

/// Write `manifest.json` into `dir`, replacing any existing file.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf, ScanError> {
    let path = dir.join(MANIFEST_FILE);
    fs::write(&path, manifest.to_json()?)?;
    Ok(path)
}

/// Resolve the configured gallery under `root`, build and write its manifest.
pub fn run(config: &ProjectConfig, root: &Path) -> Result<BuildSummary, ScanError> {
    let dir = config.gallery_dir(root);
    let manifest = build(&dir, &config.base_path())?;
    let manifest_path = write_manifest(&dir, &manifest)?;
    log::info!("wrote {}", manifest_path.display());
    Ok(BuildSummary {
        manifest_path,
        image_count: manifest.images.len(),
    })
}
