//! Emitter configuration

use serde::Deserialize;

/// Controls symbol naming and layout of the generated header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmitOptions {
    /// Prefix for every generated symbol (`BMFONT` -> `BMFONT_<NAME>_BUCKETS`)
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Byte literals per line in page arrays
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: usize,

    /// `__attribute__((aligned(N)))` on page arrays. 0 disables it.
    #[serde(default = "default_page_alignment")]
    pub page_alignment: u32,

    /// Trailing `// 65 ('A')` comments on glyph and kerning rows
    #[serde(default = "default_true")]
    pub glyph_comments: bool,

    /// File extension used when the output name is derived from the font
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_prefix() -> String {
    "BMFONT".to_string()
}

fn default_bytes_per_line() -> usize {
    16
}

fn default_page_alignment() -> u32 {
    16
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "h".to_string()
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            bytes_per_line: default_bytes_per_line(),
            page_alignment: default_page_alignment(),
            glyph_comments: true,
            extension: default_extension(),
        }
    }
}

impl EmitOptions {
    /// Bytes per page-array line, never zero
    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line.max(1)
    }
}
