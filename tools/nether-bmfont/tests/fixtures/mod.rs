//! Descriptor and page fixtures shared by the integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Bytes of the stub page used by the reference descriptor
pub const STUB_PAGE: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Reference descriptor: two adjacent glyphs, one kerning pair, one page
pub const TEST_DESCRIPTOR: &str = r#"info face="Test" size=16 bold=0 italic=0 charset="" unicode=1 stretchH=100 smooth=1 aa=1 padding=0,0,0,0 spacing=1,1
common lineHeight=20 base=16 scaleW=256 scaleH=256 pages=1 packed=0 alphaChnl=0 redChnl=3 greenChnl=3 blueChnl=3
page id=0 file="page0.png"
chars count=2
char id=65   x=0     y=0     width=10    height=14    xoffset=0     yoffset=2     xadvance=11    page=0  chnl=15
char id=66   x=11    y=0     width=9     height=14    xoffset=1     yoffset=2     xadvance=10    page=0  chnl=15
kernings count=1
kerning first=65  second=66  amount=-2
"#;

/// Write the reference descriptor and its page into `dir`
pub fn write_test_font(dir: &Path) -> PathBuf {
    std::fs::write(dir.join("page0.png"), STUB_PAGE).expect("Failed to write page");
    let path = dir.join("test.fnt");
    std::fs::write(&path, TEST_DESCRIPTOR).expect("Failed to write descriptor");
    path
}

/// Write a descriptor with arbitrary contents
pub fn write_descriptor(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write descriptor");
    path
}

/// Decode the byte literals of the array named `symbol` back into bytes.
///
/// Only the definition line starts with `const`; the forward declaration
/// starts with `extern const` and is skipped.
pub fn extract_page_bytes(header: &str, symbol: &str) -> Vec<u8> {
    let definition = format!("\nconst unsigned char {}[] ", symbol);
    let start = header
        .find(&definition)
        .unwrap_or_else(|| panic!("page array {} not defined", symbol));
    let body = &header[start..];
    let open = body.find('{').expect("page array has no body") + 1;
    let close = body.find("};").expect("page array not closed");

    body[open..close]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let hex = s.strip_prefix("0x").expect("byte literal without 0x");
            u8::from_str_radix(hex, 16).expect("invalid byte literal")
        })
        .collect()
}
