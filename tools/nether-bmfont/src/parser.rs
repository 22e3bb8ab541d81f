//! BMFont text descriptor parser
//!
//! Lines are classified by their first token. Only `info`, `common`, `page`,
//! `char` and `kerning` carry data; every other tag is skipped. Malformed
//! numeric fields are recorded in [`Diagnostics`] and skipped, except
//! `info size=`, which aborts the parse.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{FontError, ParseFailure};
use crate::fields::{self, Field};
use crate::model::{ChannelType, Font, Glyph, Page};
use crate::naming;

/// Parse a descriptor file. Page paths resolve against its directory.
pub fn parse_descriptor(path: &Path, diagnostics: &mut Diagnostics) -> Result<Font, ParseFailure> {
    let file = File::open(path).map_err(|source| ParseFailure {
        error: FontError::Open {
            path: path.to_path_buf(),
            source,
        },
        partial: Font::default(),
    })?;

    tracing::info!("Parsing font descriptor {:?}", path);

    let base_dir = path.parent().unwrap_or(Path::new("."));
    DescriptorParser::new(path, base_dir, diagnostics).run(BufReader::new(file))
}

/// Parse descriptor text from any reader. Page paths resolve against `base_dir`.
pub fn parse_descriptor_reader<R: BufRead>(
    reader: R,
    base_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<Font, ParseFailure> {
    DescriptorParser::new(Path::new("<descriptor>"), base_dir, diagnostics).run(reader)
}

struct DescriptorParser<'d> {
    font: Font,
    source: PathBuf,
    base_dir: PathBuf,
    diagnostics: &'d mut Diagnostics,
    line: usize,
    tag: String,
}

impl<'d> DescriptorParser<'d> {
    fn new(source: &Path, base_dir: &Path, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            font: Font::default(),
            source: source.to_path_buf(),
            base_dir: base_dir.to_path_buf(),
            diagnostics,
            line: 0,
            tag: String::new(),
        }
    }

    fn run<R: BufRead>(mut self, reader: R) -> Result<Font, ParseFailure> {
        for bytes in reader.split(b'\n') {
            self.line += 1;

            let result = match bytes {
                Ok(bytes) => self.parse_line(&String::from_utf8_lossy(&bytes)),
                Err(source) => Err(FontError::Read {
                    path: self.source.clone(),
                    source,
                }),
            };

            if let Err(error) = result {
                return Err(ParseFailure {
                    error,
                    partial: self.font,
                });
            }
        }

        if self.font.name.is_empty() {
            self.font.name = naming::FALLBACK_NAME.to_string();
        }

        tracing::debug!(
            "Parsed {} glyphs in {} buckets, {} kerning pairs, {} pages",
            self.font.glyph_count(),
            self.font.buckets().len(),
            self.font.kerning_count(),
            self.font.pages().len()
        );

        Ok(self.font)
    }

    fn parse_line(&mut self, line: &str) -> Result<(), FontError> {
        let Some(tag) = fields::tag(line) else {
            return Ok(());
        };
        self.tag.clear();
        self.tag.push_str(tag);

        match tag {
            "info" => self.parse_info(line),
            "common" => self.parse_common(line),
            "page" => self.parse_page(line),
            "char" => {
                self.parse_char(line);
                Ok(())
            }
            "kerning" => {
                self.parse_kerning(line);
                Ok(())
            }
            // `chars`/`kernings` only carry counts
            _ => Ok(()),
        }
    }

    fn parse_info(&mut self, line: &str) -> Result<(), FontError> {
        tracing::debug!("Parsing info tag");
        for field in fields::split_fields(line, &["face"]) {
            match field.key {
                "face" => self.font.name = naming::symbol_name(&field.value),
                "size" => {
                    // Negative sizes mean "match character height"
                    let size: i16 = field.value.parse().map_err(|source| FontError::FontSize {
                        value: field.value.clone(),
                        source,
                    })?;
                    self.font.size = size.unsigned_abs();
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_common(&mut self, line: &str) -> Result<(), FontError> {
        tracing::debug!("Parsing common tag");
        for field in fields::split_fields(line, &[]) {
            match field.key {
                "lineHeight" => self.set(&field, |font, v| font.line_height = v),
                "base" => self.set(&field, |font, v| font.base = v),
                "scaleW" => self.set(&field, |font, v| font.scale_w = v),
                "scaleH" => self.set(&field, |font, v| font.scale_h = v),
                "packed" => self.set(&field, |font, v| font.packed = v),
                "alphaChnl" => {
                    if let Some(channel) = self.channel(&field)? {
                        self.font.alpha_channel = channel;
                    }
                }
                "redChnl" => {
                    if let Some(channel) = self.channel(&field)? {
                        self.font.red_channel = channel;
                    }
                }
                "greenChnl" => {
                    if let Some(channel) = self.channel(&field)? {
                        self.font.green_channel = channel;
                    }
                }
                "blueChnl" => {
                    if let Some(channel) = self.channel(&field)? {
                        self.font.blue_channel = channel;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_page(&mut self, line: &str) -> Result<(), FontError> {
        tracing::debug!("Parsing page tag");
        for field in fields::split_fields(line, &["file"]) {
            match field.key {
                "id" => tracing::debug!("Found page {}", field.value),
                "file" => {
                    let path = self.base_dir.join(&field.value);
                    tracing::info!("Opening page {:?}", path);
                    let page = Page::open(&path)?;
                    self.font.push_page(page);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_char(&mut self, line: &str) {
        let mut glyph = Glyph::default();
        for field in fields::split_fields(line, &[]) {
            match field.key {
                "id" => self.assign(&field, &mut glyph.id),
                "x" => self.assign(&field, &mut glyph.x),
                "y" => self.assign(&field, &mut glyph.y),
                "width" => self.assign(&field, &mut glyph.width),
                "height" => self.assign(&field, &mut glyph.height),
                "xoffset" => self.assign(&field, &mut glyph.x_offset),
                "yoffset" => self.assign(&field, &mut glyph.y_offset),
                "xadvance" => self.assign(&field, &mut glyph.x_advance),
                "page" => self.assign(&field, &mut glyph.page),
                "chnl" | "channels" => self.assign(&field, &mut glyph.channels),
                _ => {}
            }
        }

        if let Err(duplicate) = self.font.insert_glyph(glyph) {
            self.diagnostics.push(Diagnostic {
                line: self.line,
                tag: self.tag.clone(),
                kind: DiagnosticKind::DuplicateGlyph { id: duplicate.id },
            });
        }
    }

    fn parse_kerning(&mut self, line: &str) {
        let mut first: u32 = 0;
        let mut second: u32 = 0;
        let mut amount: i16 = 0;
        for field in fields::split_fields(line, &[]) {
            match field.key {
                "first" => self.assign(&field, &mut first),
                "second" => self.assign(&field, &mut second),
                "amount" => self.assign(&field, &mut amount),
                _ => {}
            }
        }

        // Zero amounts and pairs for unknown glyphs are dropped without a notice
        self.font.add_kerning(first, second, amount);
    }

    /// Parse a numeric field, recording a diagnostic on failure
    fn number<T>(&mut self, field: &Field<'_>) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match field.value.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                self.diagnostics.push(Diagnostic {
                    line: self.line,
                    tag: self.tag.clone(),
                    kind: DiagnosticKind::InvalidValue {
                        field: field.key.to_string(),
                        value: field.value.clone(),
                        reason: err.to_string(),
                    },
                });
                None
            }
        }
    }

    fn assign<T>(&mut self, field: &Field<'_>, slot: &mut T)
    where
        T: FromStr,
        T::Err: Display,
    {
        if let Some(value) = self.number(field) {
            *slot = value;
        }
    }

    fn set<T>(&mut self, field: &Field<'_>, apply: impl FnOnce(&mut Font, T))
    where
        T: FromStr,
        T::Err: Display,
    {
        if let Some(value) = self.number(field) {
            apply(&mut self.font, value);
        }
    }

    /// Resolve a channel index. Non-numeric is recoverable, out of range is not.
    fn channel(&mut self, field: &Field<'_>) -> Result<Option<ChannelType>, FontError> {
        let Some(index) = self.number::<u32>(field) else {
            return Ok(None);
        };
        ChannelType::from_index(index)
            .map(Some)
            .ok_or_else(|| FontError::ChannelIndex {
                field: field.key.to_string(),
                index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (Result<Font, ParseFailure>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let result = parse_descriptor_reader(text.as_bytes(), Path::new("."), &mut diagnostics);
        (result, diagnostics)
    }

    fn parse_ok(text: &str) -> (Font, Diagnostics) {
        let (result, diagnostics) = parse(text);
        (result.expect("descriptor should parse"), diagnostics)
    }

    #[test]
    fn test_info_and_common() {
        let (font, diagnostics) = parse_ok(
            "info face=\"Test\" size=16 bold=0 italic=0\n\
             common lineHeight=20 base=16 scaleW=256 scaleH=128 pages=1 packed=0 alphaChnl=0 redChnl=3 greenChnl=3 blueChnl=4\n",
        );

        assert!(diagnostics.is_empty());
        assert_eq!(font.name, "TEST");
        assert_eq!(font.size, 16);
        assert_eq!(font.line_height, 20);
        assert_eq!(font.base, 16);
        assert_eq!(font.scale_w, 256);
        assert_eq!(font.scale_h, 128);
        assert_eq!(font.packed, 0);
        assert_eq!(font.alpha_channel, ChannelType::Glyph);
        assert_eq!(font.red_channel, ChannelType::Zero);
        assert_eq!(font.green_channel, ChannelType::Zero);
        assert_eq!(font.blue_channel, ChannelType::One);
        assert!(font.buckets().is_empty());
        assert!(font.pages().is_empty());
    }

    #[test]
    fn test_face_spread_over_tokens() {
        let (font, _) = parse_ok("info face=\"Open Sans Bold\" size=12\n");
        assert_eq!(font.name, "OPEN_SANS_BOLD");
    }

    #[test]
    fn test_unquoted_face_continuation() {
        let (font, _) = parse_ok("info face=Comic Mono size=12 charset=\"\"\n");
        assert_eq!(font.name, "COMIC_MONO");
    }

    #[test]
    fn test_negative_size_uses_magnitude() {
        let (font, _) = parse_ok("info face=\"A\" size=-24\n");
        assert_eq!(font.size, 24);
    }

    #[test]
    fn test_bad_size_is_fatal() {
        let (result, _) = parse("info face=\"Partial\" size=big\nchar id=65\n");
        let failure = result.unwrap_err();
        assert!(matches!(failure.error, FontError::FontSize { ref value, .. } if value == "big"));
        // Stopped at the info line
        assert_eq!(failure.partial.name, "PARTIAL");
        assert!(failure.partial.buckets().is_empty());
    }

    #[test]
    fn test_channel_index_out_of_range_is_fatal() {
        let (result, _) = parse("common alphaChnl=5\n");
        let failure = result.unwrap_err();
        assert!(matches!(
            failure.error,
            FontError::ChannelIndex { ref field, index: 5 } if field == "alphaChnl"
        ));
    }

    #[test]
    fn test_channel_not_numeric_is_recoverable() {
        let (font, diagnostics) = parse_ok("common redChnl=x greenChnl=1\n");
        assert_eq!(font.red_channel, ChannelType::Glyph);
        assert_eq!(font.green_channel, ChannelType::Outline);
        assert_eq!(diagnostics.for_field("redChnl").count(), 1);
    }

    #[test]
    fn test_malformed_field_skipped_rest_parsed() {
        let (font, diagnostics) =
            parse_ok("char id=65 x=abc y=7 width=3 height=4 xoffset=-1 yoffset=2 xadvance=5 page=0 chnl=15\n");

        let glyph = font.glyph(65).unwrap();
        assert_eq!(glyph.x, 0);
        assert_eq!(glyph.y, 7);
        assert_eq!(glyph.x_offset, -1);
        assert_eq!(glyph.channels, 15);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics.entries()[0];
        assert_eq!(diagnostic.line, 1);
        assert_eq!(diagnostic.tag, "char");
        assert!(matches!(
            &diagnostic.kind,
            DiagnosticKind::InvalidValue { field, value, .. } if field == "x" && value == "abc"
        ));
    }

    #[test]
    fn test_out_of_range_value_is_recoverable() {
        let (font, diagnostics) = parse_ok("common lineHeight=300 base=16\n");
        assert_eq!(font.line_height, 0);
        assert_eq!(font.base, 16);
        assert_eq!(diagnostics.for_field("lineHeight").count(), 1);
    }

    #[test]
    fn test_chars_and_kernings_tags_ignored() {
        let (font, diagnostics) = parse_ok(
            "chars count=2\n\
             char id=65\n\
             char id=66\n\
             kernings count=1\n\
             kerning first=65 second=66 amount=-2\n\
             unknown foo=bar\n",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(font.buckets().len(), 1);
        assert_eq!(font.kerning_count(), 1);
    }

    #[test]
    fn test_kerning_attaches_to_first_glyph() {
        let (font, _) = parse_ok(
            "char id=65\n\
             char id=66\n\
             kerning first=65 second=66 amount=-2\n",
        );
        let bucket = &font.buckets()[0];
        assert_eq!(bucket.glyphs()[0].kernings.get(&66), Some(&-2));
        assert!(!bucket.glyphs()[1].has_kernings());
    }

    #[test]
    fn test_zero_and_orphan_kerning_dropped_silently() {
        let (font, diagnostics) = parse_ok(
            "char id=65\n\
             kerning first=65 second=66 amount=0\n\
             kerning first=99 second=65 amount=3\n",
        );
        assert_eq!(font.kerning_count(), 0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_glyph_recorded() {
        let (font, diagnostics) = parse_ok("char id=65 x=1\nchar id=65 x=2\n");
        assert_eq!(font.glyph_count(), 1);
        assert_eq!(font.glyph(65).unwrap().x, 1);
        assert_eq!(
            diagnostics.entries()[0].kind,
            DiagnosticKind::DuplicateGlyph { id: 65 }
        );
        assert_eq!(diagnostics.entries()[0].line, 2);
    }

    #[test]
    fn test_missing_face_gets_fallback_name() {
        let (font, _) = parse_ok("common lineHeight=10\n");
        assert_eq!(font.name, naming::FALLBACK_NAME);
    }

    #[test]
    fn test_missing_page_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagnostics = Diagnostics::new();
        let result = parse_descriptor_reader(
            "page id=0 file=\"missing.png\"\n".as_bytes(),
            dir.path(),
            &mut diagnostics,
        );
        let failure = result.unwrap_err();
        assert!(matches!(failure.error, FontError::Open { ref path, .. } if path.ends_with("missing.png")));
    }

    #[test]
    fn test_page_file_with_spaces() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my page.png"), [0u8; 5]).unwrap();

        let mut diagnostics = Diagnostics::new();
        let font = parse_descriptor_reader(
            "page id=0 file=\"my page.png\"\n".as_bytes(),
            dir.path(),
            &mut diagnostics,
        )
        .unwrap();
        assert_eq!(font.pages().len(), 1);
        assert_eq!(font.pages()[0].size(), 5);
    }

    #[test]
    fn test_missing_descriptor_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagnostics = Diagnostics::new();
        let failure = parse_descriptor(&dir.path().join("nope.fnt"), &mut diagnostics).unwrap_err();
        assert!(matches!(failure.error, FontError::Open { .. }));
    }

    #[test]
    fn test_crlf_descriptor() {
        let (font, diagnostics) = parse_ok("info face=\"Win\" size=8\r\nchar id=32 xadvance=4\r\n");
        assert!(diagnostics.is_empty());
        assert_eq!(font.name, "WIN");
        assert_eq!(font.glyph(32).unwrap().x_advance, 4);
    }
}
