//! Showcase runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the core. Binaries read
//! environment variables and hand the raw values to the parsers here; nothing in the core reads
//! the process environment while handling events.

use crate::constants::DEFAULT_ASSET_DIR;
use crate::{ShowcaseError, ShowcaseResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Whether this is a shipped build or a developer build.
///
/// Development builds run the dataset invariant checks at startup; production builds skip them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// The mode implied by how the binary was compiled.
    pub fn compiled_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for BuildMode {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(ShowcaseError::InvalidInput(format!(
                "unknown build mode '{other}' (expected 'production' or 'development')"
            ))),
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Parse the build mode from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`BuildMode::compiled_default`].
pub fn build_mode_from_env_value(value: Option<String>) -> ShowcaseResult<BuildMode> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<BuildMode>()).transpose()?;

    Ok(parsed.unwrap_or_else(BuildMode::compiled_default))
}

/// Resolve the asset directory from an optional override.
///
/// The directory is not required to exist: a missing directory simply means every asset renders
/// as a placeholder.
pub fn asset_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR))
}

/// Showcase configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ShowcaseConfig {
    mode: BuildMode,
    asset_dir: PathBuf,
}

impl ShowcaseConfig {
    pub fn new(mode: BuildMode, asset_dir: PathBuf) -> Self {
        Self { mode, asset_dir }
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn is_production(&self) -> bool {
        self.mode.is_production()
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self::new(BuildMode::compiled_default(), PathBuf::from(DEFAULT_ASSET_DIR))
    }
}
