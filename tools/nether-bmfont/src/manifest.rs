//! fonts.toml manifest for batch conversion
//!
//! ```toml
//! [options]
//! prefix = "BMFONT"
//! output_dir = "include/fonts"
//!
//! [[fonts]]
//! input = "fonts/body.fnt"
//!
//! [[fonts]]
//! input = "fonts/title.fnt"
//! output = "include/title_font.h"
//! ```
//!
//! Relative paths resolve against the manifest's directory.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::convert::{convert_font, Conversion};
use crate::options::EmitOptions;

/// fonts.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct FontManifest {
    #[serde(default)]
    pub options: ManifestOptions,
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
}

/// `[options]` section: emitter settings plus a default destination
#[derive(Debug, Default, Deserialize)]
pub struct ManifestOptions {
    #[serde(flatten)]
    pub emit: EmitOptions,

    /// Directory for fonts without an explicit `output`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Single font entry
#[derive(Debug, Deserialize)]
pub struct FontEntry {
    /// BMFont text descriptor (.fnt)
    pub input: PathBuf,

    /// Output file or directory. Falls back to `options.output_dir`.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl FontManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse fonts.toml")
    }

    /// Check the manifest without touching any font files
    pub fn validate(&self) -> Result<()> {
        if self.fonts.is_empty() {
            bail!("Manifest lists no fonts");
        }
        for (i, entry) in self.fonts.iter().enumerate() {
            if entry.input.as_os_str().is_empty() {
                bail!("Font entry {} has an empty input path", i);
            }
        }
        Ok(())
    }

    /// Destination for `entry`, resolved against `base_dir`.
    ///
    /// `output_override` replaces `options.output_dir` but not a per-font
    /// `output`.
    pub fn destination(
        &self,
        entry: &FontEntry,
        base_dir: &Path,
        output_override: Option<&Path>,
    ) -> PathBuf {
        match (&entry.output, output_override, &self.options.output_dir) {
            (Some(output), _, _) => base_dir.join(output),
            (None, Some(dir), _) => dir.to_path_buf(),
            (None, None, Some(dir)) => base_dir.join(dir),
            (None, None, None) => base_dir.to_path_buf(),
        }
    }
}

/// Convert every font in the manifest at `manifest_path`
pub fn build_all(manifest_path: &Path, output_override: Option<&Path>) -> Result<Vec<Conversion>> {
    let manifest = FontManifest::load(manifest_path)?;
    manifest.validate()?;

    let base_dir = manifest_path.parent().unwrap_or(Path::new("."));

    if let Some(dir) = output_override.map(Path::to_path_buf).or_else(|| {
        manifest.options.output_dir.as_ref().map(|d| base_dir.join(d))
    }) {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut conversions = Vec::with_capacity(manifest.fonts.len());
    for entry in &manifest.fonts {
        let input = base_dir.join(&entry.input);
        let destination = manifest.destination(entry, base_dir, output_override);
        let conversion = convert_font(&input, Some(&destination), &manifest.options.emit)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        conversions.push(conversion);
    }

    tracing::info!("Converted {} font(s)", conversions.len());
    Ok(conversions)
}
