//! Font model built by the descriptor parser and consumed by the emitter
//!
//! Glyphs live in [`Bucket`]s: contiguous code-point runs where the glyph at
//! index `i` has code point `start_char + i`. The runtime looks a code point
//! up by scanning bucket ranges and indexing directly into the run.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::FontError;

/// What a single atlas color channel stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelType {
    #[default]
    Glyph,
    Outline,
    GlyphOutline,
    Zero,
    One,
}

impl ChannelType {
    /// Channel semantics in descriptor index order (`alphaChnl=0` is `Glyph`)
    pub const ALL: [ChannelType; 5] = [
        ChannelType::Glyph,
        ChannelType::Outline,
        ChannelType::GlyphOutline,
        ChannelType::Zero,
        ChannelType::One,
    ];

    /// Resolve a descriptor channel index
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Enumerator name in the generated `ChannelType` enum
    pub fn c_name(self) -> &'static str {
        match self {
            ChannelType::Glyph => "CHANNEL_GLYPH",
            ChannelType::Outline => "CHANNEL_OUTLINE",
            ChannelType::GlyphOutline => "CHANNEL_GLYPH_OUTLINE",
            ChannelType::Zero => "CHANNEL_ZERO",
            ChannelType::One => "CHANNEL_ONE",
        }
    }
}

/// One code point's atlas rectangle, metrics and kerning pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    pub id: u32,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub x_offset: i16,
    pub y_offset: i16,
    pub x_advance: i16,
    pub page: u8,
    /// Bit mask: 1 = blue, 2 = green, 4 = red, 8 = alpha, 15 = all
    pub channels: u8,
    /// Second code point -> adjustment. Empty when the glyph has no pairs.
    pub kernings: BTreeMap<u32, i16>,
}

impl Glyph {
    pub fn has_kernings(&self) -> bool {
        !self.kernings.is_empty()
    }
}

/// Contiguous run of code points `[start_char, end_char]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    start_char: u32,
    end_char: u32,
    glyphs: Vec<Glyph>,
}

impl Bucket {
    /// Start a singleton bucket
    pub fn new(glyph: Glyph) -> Self {
        Self {
            start_char: glyph.id,
            end_char: glyph.id,
            glyphs: vec![glyph],
        }
    }

    pub fn start_char(&self) -> u32 {
        self.start_char
    }

    pub fn end_char(&self) -> u32 {
        self.end_char
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn contains(&self, id: u32) -> bool {
        (self.start_char..=self.end_char).contains(&id)
    }

    /// Whether `id` directly follows the current end of the run
    pub fn is_successor(&self, id: u32) -> bool {
        self.end_char.checked_add(1) == Some(id)
    }

    pub fn glyph(&self, id: u32) -> Option<&Glyph> {
        if !self.contains(id) {
            return None;
        }
        self.glyphs.get((id - self.start_char) as usize)
    }

    pub fn glyph_mut(&mut self, id: u32) -> Option<&mut Glyph> {
        if !self.contains(id) {
            return None;
        }
        self.glyphs.get_mut((id - self.start_char) as usize)
    }

    /// Extend the run by one glyph. Caller checks [`Bucket::is_successor`].
    fn push(&mut self, glyph: Glyph) {
        debug_assert!(self.is_successor(glyph.id));
        self.end_char = glyph.id;
        self.glyphs.push(glyph);
    }
}

/// One atlas image file, opened at parse time and read once at emit time
#[derive(Debug)]
pub struct Page {
    size: u32,
    path: PathBuf,
    file: File,
}

impl Page {
    /// Stat and open a page file, caching its byte size
    pub fn open(path: &Path) -> Result<Self, FontError> {
        let metadata = std::fs::metadata(path).map_err(|source| FontError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let size = u32::try_from(metadata.len()).map_err(|_| FontError::PageTooLarge {
            path: path.to_path_buf(),
            len: metadata.len(),
        })?;
        let file = File::open(path).map_err(|source| FontError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            size,
            path: path.to_path_buf(),
            file,
        })
    }

    /// Byte size recorded when the page was opened
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hand the open file over to the reader. Dropping the result closes it.
    pub fn into_file(self) -> File {
        self.file
    }
}

/// Parsed font: metadata, glyph buckets and page files
#[derive(Debug, Default)]
pub struct Font {
    /// UPPER_SNAKE identifier derived from the face name
    pub name: String,
    pub size: u16,
    pub line_height: u8,
    pub base: u8,
    pub scale_w: u16,
    pub scale_h: u16,
    pub packed: u8,
    pub alpha_channel: ChannelType,
    pub red_channel: ChannelType,
    pub green_channel: ChannelType,
    pub blue_channel: ChannelType,
    buckets: Vec<Bucket>,
    pages: Vec<Page>,
}

impl Font {
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Give up ownership of the page files
    pub fn take_pages(&mut self) -> Vec<Page> {
        std::mem::take(&mut self.pages)
    }

    /// Append a glyph to the bucket it directly follows, or start a new one.
    ///
    /// Ranges are never merged after the fact, so insertion order decides the
    /// bucket layout. A code point that is already covered is handed back.
    pub fn insert_glyph(&mut self, glyph: Glyph) -> Result<(), Glyph> {
        if self.buckets.iter().any(|b| b.contains(glyph.id)) {
            return Err(glyph);
        }

        match self.buckets.iter_mut().find(|b| b.is_successor(glyph.id)) {
            Some(bucket) => bucket.push(glyph),
            None => self.buckets.push(Bucket::new(glyph)),
        }
        Ok(())
    }

    pub fn glyph(&self, id: u32) -> Option<&Glyph> {
        self.buckets.iter().find_map(|b| b.glyph(id))
    }

    pub fn glyph_mut(&mut self, id: u32) -> Option<&mut Glyph> {
        self.buckets.iter_mut().find_map(|b| b.glyph_mut(id))
    }

    /// Attach a kerning pair to the glyph for `first`.
    ///
    /// Zero amounts and unknown `first` code points are dropped. Returns
    /// whether the pair was stored.
    pub fn add_kerning(&mut self, first: u32, second: u32, amount: i16) -> bool {
        if amount == 0 {
            return false;
        }
        match self.glyph_mut(first) {
            Some(glyph) => {
                glyph.kernings.insert(second, amount);
                true
            }
            None => false,
        }
    }

    pub fn glyph_count(&self) -> usize {
        self.buckets.iter().map(|b| b.glyphs.len()).sum()
    }

    pub fn kerning_count(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|b| b.glyphs.iter())
            .map(|g| g.kernings.len())
            .sum()
    }
}
