//! Error types for descriptor parsing and table emission

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use crate::model::Font;

/// Fatal conditions that abort a conversion.
///
/// Recoverable field problems never show up here; they are collected in
/// [`Diagnostics`](crate::Diagnostics) instead.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Descriptor or page file could not be stat'ed or opened
    #[error("Failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Descriptor line could not be read
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Page file is larger than the 32-bit size field can describe
    #[error("Page file {path:?} is {len} bytes, exceeds maximum {}", u32::MAX)]
    PageTooLarge { path: PathBuf, len: u64 },

    /// `info size=` is the one numeric field that must parse
    #[error("Invalid font size {value:?}")]
    FontSize {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Channel assignment outside the five known channel semantics
    #[error("Invalid channel index {index} for '{field}' (must be 0-4)")]
    ChannelIndex { field: String, index: u32 },

    /// Page contents could not be streamed into the output
    #[error("Failed to read page {index} ({path:?})")]
    PageRead {
        index: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output sink rejected a write
    #[error("Failed to write output")]
    Write(#[from] io::Error),
}

/// A parse error together with the partially built font.
///
/// The partial font is only meant for diagnostics and must not be emitted.
#[derive(Debug)]
pub struct ParseFailure {
    pub error: FontError,
    pub partial: Font,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Descriptor rejected after {} glyph(s)",
            self.partial.glyph_count()
        )
    }
}

impl std::error::Error for ParseFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<ParseFailure> for FontError {
    fn from(failure: ParseFailure) -> Self {
        failure.error
    }
}
