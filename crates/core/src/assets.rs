//! Static asset boundary.
//!
//! The page requests images by logical file name. Serving them is the job of an outside
//! collaborator (a directory on disk behind the preview server). When an image is missing or
//! fails to load, the page shows a placeholder that names the expected file and where to put it.

use crate::render::html::escape_html;
use crate::{ShowcaseError, ShowcaseResult};
use showcase_types::AssetName;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Source of named image assets.
pub trait AssetCatalog {
    /// Whether `name` is expected to load.
    fn contains(&self, name: &AssetName) -> bool;

    /// Human-readable location where `name` should be placed.
    fn location(&self) -> String;
}

/// Assets stored as flat files in one directory.
#[derive(Clone, Debug)]
pub struct DirAssets {
    dir: PathBuf,
}

impl DirAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads an asset's bytes. `Ok(None)` means the file does not exist.
    pub fn read(&self, name: &AssetName) -> ShowcaseResult<Option<Vec<u8>>> {
        match std::fs::read(self.dir.join(name.as_str())) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ShowcaseError::AssetRead(e)),
        }
    }
}

impl AssetCatalog for DirAssets {
    fn contains(&self, name: &AssetName) -> bool {
        self.dir.join(name.as_str()).is_file()
    }

    fn location(&self) -> String {
        format!("{}/", self.dir.display())
    }
}

/// A fixed set of available asset names.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    names: BTreeSet<AssetName>,
}

impl MemoryAssets {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = AssetName>,
    {
        Self {
            names: names.into_iter().collect(),
        }
    }
}

impl AssetCatalog for MemoryAssets {
    fn contains(&self, name: &AssetName) -> bool {
        self.names.contains(name)
    }

    fn location(&self) -> String {
        "the asset directory".to_string()
    }
}

/// MIME type for an asset, by extension.
pub fn content_type(name: &AssetName) -> &'static str {
    match name.extension().as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Remediation text shown in place of a missing image.
pub fn placeholder_message(file_name: &str, location: &str) -> String {
    format!("Image not available: expected '{file_name}' in {location}")
}

/// A standalone SVG placeholder for a missing image.
pub fn placeholder_svg(file_name: &str, location: &str) -> String {
    let message = escape_html(&placeholder_message(file_name, location));
    format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="240" viewBox="0 0 640 240">"##,
            r##"<rect width="640" height="240" fill="#f4f1ea" stroke="#b9b2a3" stroke-dasharray="8 6"/>"##,
            r##"<text x="320" y="124" font-family="sans-serif" font-size="15" fill="#5a5446" text-anchor="middle">{}</text>"##,
            "</svg>"
        ),
        message
    )
}
