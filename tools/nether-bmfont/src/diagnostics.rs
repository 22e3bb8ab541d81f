//! Recoverable problems found while parsing a descriptor
//!
//! The parser never stops for these. Each one is logged through `tracing` as
//! it is recorded and kept here so callers (and tests) can inspect them.

use std::fmt;

/// What went wrong on a descriptor line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Numeric field was malformed or out of range; the field was skipped
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// `char` for a code point that already has a glyph; the line was skipped
    DuplicateGlyph { id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based descriptor line number
    pub line: usize,
    pub tag: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InvalidValue {
                field,
                value,
                reason,
            } => write!(
                f,
                "line {} ({}): failed to parse value {:?} for field '{}': {}",
                self.line, self.tag, value, field, reason
            ),
            DiagnosticKind::DuplicateGlyph { id } => write!(
                f,
                "line {} ({}): duplicate glyph for code point {}, skipped",
                self.line, self.tag, id
            ),
        }
    }
}

/// Ordered collection of diagnostics for one parse
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics for one field name, in line order
    pub fn for_field<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries.iter().filter(move |d| {
            matches!(&d.kind, DiagnosticKind::InvalidValue { field, .. } if field == name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_value() {
        let diagnostic = Diagnostic {
            line: 3,
            tag: "char".to_string(),
            kind: DiagnosticKind::InvalidValue {
                field: "x".to_string(),
                value: "abc".to_string(),
                reason: "invalid digit found in string".to_string(),
            },
        };
        assert_eq!(
            diagnostic.to_string(),
            "line 3 (char): failed to parse value \"abc\" for field 'x': invalid digit found in string"
        );
    }

    #[test]
    fn test_for_field_filters() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic {
            line: 1,
            tag: "char".to_string(),
            kind: DiagnosticKind::DuplicateGlyph { id: 65 },
        });
        diagnostics.push(Diagnostic {
            line: 2,
            tag: "common".to_string(),
            kind: DiagnosticKind::InvalidValue {
                field: "base".to_string(),
                value: "x".to_string(),
                reason: "bad".to_string(),
            },
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.for_field("base").count(), 1);
        assert_eq!(diagnostics.for_field("x").count(), 0);
    }
}
