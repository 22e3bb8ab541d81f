//! C header emitter
//!
//! Walks a parsed [`Font`] twice: first to declare every generated array,
//! then to define them. The top-level descriptor and the bucket/page tables
//! point at arrays defined further down the file, so all declarations go out
//! before the first definition.
//!
//! Output order:
//! 1. header guard and shared type definitions
//! 2. `extern` declarations for every array
//! 3. top-level `BMFont` descriptor
//! 4. bucket table, page table
//! 5. one kerning array per glyph with kerning pairs
//! 6. one glyph array per bucket
//! 7. one byte array per page, copied verbatim from the page file

pub mod symbols;
pub mod types;

use std::io::{self, BufReader, Read, Write};

use crate::error::FontError;
use crate::model::{Font, Glyph, Page};
use crate::options::EmitOptions;

pub use symbols::Symbols;

/// Counts of what was written, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub buckets: usize,
    pub glyphs: usize,
    pub kernings: usize,
    pub pages: usize,
    pub page_bytes: u64,
}

/// One forward declaration: `extern <c_type> <symbol>[];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub c_type: &'static str,
    pub symbol: String,
}

/// Write `font` as a C header to `out`.
///
/// Takes the font by value: each page file is read to the end exactly once
/// and closed as soon as its bytes are written, or when an error unwinds.
pub fn emit_c_header<W: Write>(
    mut font: Font,
    out: W,
    options: &EmitOptions,
) -> Result<EmitSummary, FontError> {
    let pages = font.take_pages();
    let mut emitter = Emitter::new(out, options, &font.name);

    emitter.write_preamble()?;
    let declarations = declarations(&emitter.symbols, &font, &pages);
    emitter.write_declarations(&declarations)?;
    emitter.write_font(&font, pages.len())?;
    emitter.write_bucket_table(&font)?;
    emitter.write_page_table(&pages)?;
    emitter.write_kernings(&font)?;
    emitter.write_glyph_tables(&font)?;

    let page_count = pages.len();
    let page_bytes = emitter.write_page_data(pages)?;
    emitter.write_footer()?;
    emitter.out.flush()?;

    Ok(EmitSummary {
        buckets: font.buckets().len(),
        glyphs: font.glyph_count(),
        kernings: font.kerning_count(),
        pages: page_count,
        page_bytes,
    })
}

/// First pass: every array the definitions will reference
pub fn declarations(symbols: &Symbols, font: &Font, pages: &[Page]) -> Vec<Declaration> {
    let mut decls = vec![
        Declaration {
            c_type: "const BMFontBucket",
            symbol: symbols.buckets(),
        },
        Declaration {
            c_type: "const BMFontPage",
            symbol: symbols.pages(),
        },
    ];

    for glyph in kerned_glyphs(font) {
        decls.push(Declaration {
            c_type: "const BMFontKerning",
            symbol: symbols.kernings(glyph.id),
        });
    }
    for i in 0..font.buckets().len() {
        decls.push(Declaration {
            c_type: "const BMFontChar",
            symbol: symbols.bucket(i),
        });
    }
    for i in 0..pages.len() {
        decls.push(Declaration {
            c_type: "const unsigned char",
            symbol: symbols.page(i),
        });
    }

    decls
}

fn kerned_glyphs(font: &Font) -> impl Iterator<Item = &Glyph> {
    font.buckets()
        .iter()
        .flat_map(|b| b.glyphs().iter())
        .filter(|g| g.has_kernings())
}

/// Printable form of a code point for comments
fn describe(code_point: u32) -> String {
    match char::from_u32(code_point) {
        Some(c) if !c.is_control() && (c == ' ' || !c.is_whitespace()) => format!("'{}'", c),
        _ => format!("U+{:04X}", code_point),
    }
}

struct Emitter<'a, W: Write> {
    out: W,
    options: &'a EmitOptions,
    symbols: Symbols,
}

impl<'a, W: Write> Emitter<'a, W> {
    fn new(out: W, options: &'a EmitOptions, font_name: &str) -> Self {
        Self {
            out,
            options,
            symbols: Symbols::new(&options.prefix, font_name),
        }
    }

    fn write_preamble(&mut self) -> io::Result<()> {
        let guard = self.symbols.header_guard();
        writeln!(self.out, "// GENERATED FILE - DO NOT EDIT")?;
        writeln!(self.out, "// Generator: nether-bmfont")?;
        writeln!(self.out)?;
        writeln!(self.out, "#ifndef {}", guard)?;
        writeln!(self.out, "#define {}", guard)?;
        writeln!(self.out)?;
        self.out.write_all(types::TYPES.as_bytes())?;
        writeln!(self.out)
    }

    fn write_declarations(&mut self, declarations: &[Declaration]) -> io::Result<()> {
        for decl in declarations {
            writeln!(self.out, "extern {} {}[];", decl.c_type, decl.symbol)?;
        }
        writeln!(self.out)
    }

    fn write_font(&mut self, font: &Font, page_count: usize) -> io::Result<()> {
        writeln!(self.out, "const BMFont {} = {{", self.symbols.font())?;
        writeln!(self.out, "    .scaleW = {},", font.scale_w)?;
        writeln!(self.out, "    .scaleH = {},", font.scale_h)?;
        writeln!(self.out, "    .size = {},", font.size)?;
        writeln!(self.out, "    .lineHeight = {},", font.line_height)?;
        writeln!(self.out, "    .base = {},", font.base)?;
        writeln!(self.out, "    .isPacked = {},", font.packed)?;
        writeln!(self.out, "    .aChannelType = {},", font.alpha_channel.c_name())?;
        writeln!(self.out, "    .rChannelType = {},", font.red_channel.c_name())?;
        writeln!(self.out, "    .gChannelType = {},", font.green_channel.c_name())?;
        writeln!(self.out, "    .bChannelType = {},", font.blue_channel.c_name())?;
        writeln!(self.out)?;
        writeln!(self.out, "    .bucketCount = {},", font.buckets().len())?;
        writeln!(self.out, "    .buckets = {},", self.symbols.buckets())?;
        writeln!(self.out, "    .pageCount = {},", page_count)?;
        writeln!(self.out, "    .pages = {},", self.symbols.pages())?;
        writeln!(self.out, "}};")?;
        writeln!(self.out)
    }

    fn write_bucket_table(&mut self, font: &Font) -> io::Result<()> {
        writeln!(self.out, "const BMFontBucket {}[] = {{", self.symbols.buckets())?;
        for (i, bucket) in font.buckets().iter().enumerate() {
            writeln!(
                self.out,
                "    {{{}, {}, {}}},",
                bucket.start_char(),
                bucket.end_char(),
                self.symbols.bucket(i)
            )?;
        }
        writeln!(self.out, "}};")?;
        writeln!(self.out)
    }

    fn write_page_table(&mut self, pages: &[Page]) -> io::Result<()> {
        writeln!(self.out, "const BMFontPage {}[] = {{", self.symbols.pages())?;
        for (i, page) in pages.iter().enumerate() {
            writeln!(self.out, "    {{{}, {}}},", page.size(), self.symbols.page(i))?;
        }
        writeln!(self.out, "}};")?;
        writeln!(self.out)
    }

    fn write_kernings(&mut self, font: &Font) -> io::Result<()> {
        for glyph in kerned_glyphs(font) {
            write!(
                self.out,
                "const BMFontKerning {}[] = {{",
                self.symbols.kernings(glyph.id)
            )?;
            if self.options.glyph_comments {
                write!(self.out, " // {}", describe(glyph.id))?;
            }
            writeln!(self.out)?;

            for (&second, &amount) in &glyph.kernings {
                write!(self.out, "    {{{}, {}}},", second, amount)?;
                if self.options.glyph_comments {
                    write!(self.out, " // {}", describe(second))?;
                }
                writeln!(self.out)?;
            }
            writeln!(self.out, "}};")?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_glyph_tables(&mut self, font: &Font) -> io::Result<()> {
        for (i, bucket) in font.buckets().iter().enumerate() {
            writeln!(self.out, "const BMFontChar {}[] = {{", self.symbols.bucket(i))?;
            for glyph in bucket.glyphs() {
                let kernings = if glyph.has_kernings() {
                    self.symbols.kernings(glyph.id)
                } else {
                    "NULL".to_string()
                };
                write!(
                    self.out,
                    "    {{{}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}}},",
                    glyph.x,
                    glyph.y,
                    glyph.width,
                    glyph.height,
                    glyph.x_offset,
                    glyph.y_offset,
                    glyph.x_advance,
                    glyph.page,
                    glyph.kernings.len(),
                    glyph.channels,
                    kernings
                )?;
                if self.options.glyph_comments {
                    write!(self.out, " // {} ({})", glyph.id, describe(glyph.id))?;
                }
                writeln!(self.out)?;
            }
            writeln!(self.out, "}};")?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Stream every page file into a byte array, consuming the pages
    fn write_page_data(&mut self, pages: Vec<Page>) -> Result<u64, FontError> {
        let mut total = 0;
        for (index, page) in pages.into_iter().enumerate() {
            total += self.write_page(index, page)?;
        }
        Ok(total)
    }

    fn write_page(&mut self, index: usize, page: Page) -> Result<u64, FontError> {
        let path = page.path().to_path_buf();
        let expected = page.size();

        write!(self.out, "const unsigned char {}[]", self.symbols.page(index))?;
        if self.options.page_alignment > 0 {
            write!(
                self.out,
                " __attribute__((aligned({})))",
                self.options.page_alignment
            )?;
        }
        writeln!(self.out, " = {{")?;

        let per_line = self.options.bytes_per_line();
        let mut reader = BufReader::new(page.into_file());
        let mut chunk = [0u8; 8192];
        let mut row: Vec<u8> = Vec::with_capacity(per_line);
        let mut written: u64 = 0;

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(FontError::PageRead {
                        index,
                        path,
                        source,
                    })
                }
            };

            for &byte in &chunk[..n] {
                row.push(byte);
                if row.len() == per_line {
                    self.write_byte_row(&row)?;
                    row.clear();
                }
            }
            written += n as u64;
        }
        if !row.is_empty() {
            self.write_byte_row(&row)?;
        }
        // Closes the page file
        drop(reader);

        writeln!(self.out, "}};")?;
        writeln!(self.out)?;

        if written != u64::from(expected) {
            tracing::warn!(
                "Page {} ({:?}) changed size since it was opened: expected {} bytes, wrote {}",
                index,
                path,
                expected,
                written
            );
        }
        tracing::debug!("Embedded page {} ({:?}): {} bytes", index, path, written);

        Ok(written)
    }

    fn write_byte_row(&mut self, row: &[u8]) -> io::Result<()> {
        write!(self.out, "   ")?;
        for byte in row {
            write!(self.out, " 0x{:02x},", byte)?;
        }
        writeln!(self.out)
    }

    fn write_footer(&mut self) -> io::Result<()> {
        writeln!(self.out, "#endif /* {} */", self.symbols.header_guard())
    }
}
