//! Descriptor -> header conversion pipeline

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::emitter::{emit_c_header, EmitSummary};
use crate::options::EmitOptions;
use crate::output::resolve_output_path;
use crate::parser::parse_descriptor;

/// Result of one successful conversion
#[derive(Debug)]
pub struct Conversion {
    pub output: PathBuf,
    pub font_name: String,
    pub summary: EmitSummary,
    pub diagnostics: Diagnostics,
}

/// Parse `input` and write its header to `destination` (see
/// [`resolve_output_path`]). A partially written output is removed on failure.
pub fn convert_font(
    input: &Path,
    destination: Option<&Path>,
    options: &EmitOptions,
) -> Result<Conversion> {
    let input = std::path::absolute(input)
        .with_context(|| format!("Failed to resolve input path: {:?}", input))?;

    let mut diagnostics = Diagnostics::new();
    let font = parse_descriptor(&input, &mut diagnostics)
        .with_context(|| format!("Failed to parse font descriptor: {:?}", input))?;
    let font_name = font.name.clone();

    let output = resolve_output_path(destination, &font_name, &options.extension);
    let output = std::path::absolute(&output)
        .with_context(|| format!("Failed to resolve output path: {:?}", output))?;

    tracing::info!("Converting {:?} -> {:?}", input, output);

    let file =
        File::create(&output).with_context(|| format!("Failed to create output: {:?}", output))?;
    let summary = match emit_c_header(font, BufWriter::new(file), options) {
        Ok(summary) => summary,
        Err(err) => {
            if let Err(remove_err) = std::fs::remove_file(&output) {
                tracing::warn!("Failed to remove partial output {:?}: {}", output, remove_err);
            }
            return Err(err).with_context(|| format!("Failed to emit header: {:?}", output));
        }
    };

    tracing::info!(
        "Converted font '{}': {} glyphs in {} buckets, {} kerning pairs, {} pages ({} bytes)",
        font_name,
        summary.glyphs,
        summary.buckets,
        summary.kernings,
        summary.pages,
        summary.page_bytes
    );
    if !diagnostics.is_empty() {
        tracing::warn!("{} field(s) skipped, see warnings above", diagnostics.len());
    }

    Ok(Conversion {
        output,
        font_name,
        summary,
        diagnostics,
    })
}
