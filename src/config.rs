//! Project configuration.
//!
//! An optional `gallery.toml` in the project root tells the builder where the
//! gallery lives and the viewer how to behave. Every key is optional:
//!
//! ```toml
//! [gallery]
//! name = "tole"          # Gallery directory under assets_dir
//! assets_dir = "assets"  # Project-relative assets directory
//!
//! [viewer]
//! reduced_motion = false # Close the lightbox without an exit transition
//! ```
//!
//! With the defaults, images are read from `assets/tole/`, the manifest is
//! written to `assets/tole/manifest.json`, and its `basePath` is
//! `./assets/tole/`.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "gallery.toml";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Where the gallery's images live.
    pub gallery: GalleryConfig,
    /// Lightbox behaviour.
    pub viewer: ViewerConfig,
}

/// Location of the single gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory name of the gallery inside `assets_dir`.
    pub name: String,
    /// Project-relative directory holding galleries.
    pub assets_dir: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            name: "tole".to_string(),
            assets_dir: "assets".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Mirrors `prefers-reduced-motion: reduce`; skips the close delay.
    pub reduced_motion: bool,
}

fn validate_segment(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{key} must be a single directory name, got {value:?}"
        )));
    }
    Ok(())
}

impl ProjectConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_segment("gallery.name", &self.gallery.name)?;
        validate_segment("gallery.assets_dir", &self.gallery.assets_dir)?;
        Ok(())
    }

    /// Filesystem directory holding the gallery images.
    pub fn gallery_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.gallery.assets_dir).join(&self.gallery.name)
    }

    /// URL prefix written into the manifest and used by the viewer.
    pub fn base_path(&self) -> String {
        format!("./{}/{}/", self.gallery.assets_dir, self.gallery.name)
    }

    /// URL the viewer fetches the manifest from.
    pub fn manifest_url(&self) -> String {
        format!("{}{}", self.base_path(), MANIFEST_FILE)
    }
}

/// Load `gallery.toml` from the project root.
///
/// A missing file yields the defaults. Partial files override only the keys
/// they set.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        ProjectConfig::default()
    };
    config.validate()?;
    log::debug!("loaded config: {config:?}");
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# lightbox-gal configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Gallery location
# ---------------------------------------------------------------------------
[gallery]
# Directory name of the gallery. Images are read from <assets_dir>/<name>/
# and the manifest is written next to them.
name = "tole"

# Project-relative directory holding the gallery.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Viewer
# ---------------------------------------------------------------------------
[viewer]
# Close the lightbox immediately instead of playing the exit transition,
# like a browser with prefers-reduced-motion: reduce.
reduced_motion = false
"##
}
