//! Level file loading.

use anyhow::{Context, Result, bail};
use std::path::Path;
use strictly_unblock::LevelDescriptor;
use tracing::{debug, info, instrument};

/// On-disk level formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum LevelFormat {
    /// `.json` level export.
    #[display("json")]
    Json,
    /// `.toml` hand-authored level.
    #[display("toml")]
    Toml,
}

impl LevelFormat {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => bail!("Unsupported level extension '.{}'", other),
            None => bail!("Level file {} has no extension", path.display()),
        }
    }
}

/// Reads and parses a level file.
///
/// The descriptor is parsed only; call [`LevelDescriptor::validate`] or
/// build a puzzle to check its geometry.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_level(path: impl AsRef<Path>) -> Result<LevelDescriptor> {
    let path = path.as_ref();
    let format = LevelFormat::from_path(path)?;
    debug!(%format, "Reading level file");

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read level file {}", path.display()))?;

    let level = match format {
        LevelFormat::Json => LevelDescriptor::from_json(&text),
        LevelFormat::Toml => LevelDescriptor::from_toml(&text),
    }
    .with_context(|| format!("Failed to parse level file {}", path.display()))?;

    info!(
        level_id = level.level_id(),
        vehicles = level.vehicles().len(),
        "Level loaded"
    );
    Ok(level)
}
