//! Identifiers for every generated table

/// Symbol names for one font, all sharing `<PREFIX>_<NAME>`
#[derive(Debug, Clone)]
pub struct Symbols {
    base: String,
}

impl Symbols {
    pub fn new(prefix: &str, font_name: &str) -> Self {
        let base = if prefix.is_empty() {
            font_name.to_string()
        } else {
            format!("{}_{}", prefix, font_name)
        };
        Self { base }
    }

    /// Top-level `BMFont` descriptor
    pub fn font(&self) -> &str {
        &self.base
    }

    pub fn header_guard(&self) -> String {
        format!("{}_H", self.base)
    }

    pub fn buckets(&self) -> String {
        format!("{}_BUCKETS", self.base)
    }

    pub fn pages(&self) -> String {
        format!("{}_PAGES", self.base)
    }

    /// Glyph array of bucket `index`
    pub fn bucket(&self, index: usize) -> String {
        format!("{}_BUCKET_{}", self.base, index)
    }

    /// Byte array of page `index`
    pub fn page(&self, index: usize) -> String {
        format!("{}_PAGE_{}", self.base, index)
    }

    /// Kerning array of the glyph for `code_point`
    pub fn kernings(&self, code_point: u32) -> String {
        format!("{}_KERNINGS_CHAR_{}", self.base, code_point)
    }
}
