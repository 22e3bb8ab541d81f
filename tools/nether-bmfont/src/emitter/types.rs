//! Fixed C type definitions shared by every generated font header

/// Guarded so several font headers can be included in one translation unit
pub const TYPES: &str = r#"#ifndef BMFONT_TYPES_H
#define BMFONT_TYPES_H

#include <stdint.h>
#include <stddef.h>

typedef struct BMFontKerning {
  uint32_t secondChar;
  int16_t amount;
} BMFontKerning;

typedef struct BMFontChar {
  uint16_t x;
  uint16_t y;
  uint16_t width;
  uint16_t height;
  int16_t xoffset;
  int16_t yoffset;
  int16_t xadvance;
  uint8_t page;
  uint8_t kerningsCount;
  uint8_t channels; // 1 - blue, 2 - green, 4 - red, 8 - alpha, 15 - all
  const BMFontKerning *kernings;
} BMFontChar;

typedef struct BMFontBucket {
  uint32_t startChar; // glyph for code point ch is chars[ch - startChar]
  uint32_t endChar;
  const BMFontChar *chars;
} BMFontBucket;

typedef struct BMFontPage {
  uint32_t size;
  const unsigned char *data;
} BMFontPage;

typedef enum {
  CHANNEL_GLYPH,
  CHANNEL_OUTLINE,
  CHANNEL_GLYPH_OUTLINE,
  CHANNEL_ZERO,
  CHANNEL_ONE,
} ChannelType;

typedef struct BMFont {
  uint16_t scaleW;
  uint16_t scaleH;
  uint16_t size;
  uint8_t lineHeight;
  uint8_t base;
  uint8_t isPacked;
  ChannelType aChannelType;
  ChannelType rChannelType;
  ChannelType gChannelType;
  ChannelType bChannelType;

  uint16_t bucketCount;
  const BMFontBucket *buckets;
  uint16_t pageCount;
  const BMFontPage *pages;
} BMFont;

#endif /* BMFONT_TYPES_H */
"#;
