//! nether-bmfont library
//!
//! Converts BMFont text descriptors (.fnt) and their page images into a C
//! header of constant tables that a runtime can link without any file or
//! parsing support.

pub mod convert;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod fields;
pub mod manifest;
pub mod model;
pub mod naming;
pub mod options;
pub mod output;
pub mod parser;

pub use convert::{convert_font, Conversion};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use emitter::{emit_c_header, EmitSummary};
pub use error::{FontError, ParseFailure};
pub use model::{Bucket, ChannelType, Font, Glyph, Page};
pub use options::EmitOptions;
pub use parser::{parse_descriptor, parse_descriptor_reader};
