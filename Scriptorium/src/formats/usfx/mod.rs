//! USFX output format
//!
//! Writes annotated books in the USFX vocabulary (`book`, `c`, `v`, `ve`,
//! `f`, `x`). Output is a pure function of the input: no wall-clock content
//! except the preface date, which callers pass in.

mod options;
mod preface;
mod writer;

pub use options::UsfxOptions;
pub use preface::serialize_preface;
pub use writer::{serialize_collection, serialize_usfx, write_usfx};

/// `xmlns:xsi` value of the `usfx` root.
pub const USFX_NAMESPACE: &str = "http://eBible.org/usfx.xsd";

/// `xsi:noNamespaceSchemaLocation` value of the `usfx` root.
pub const USFX_SCHEMA_LOCATION: &str = "usfx.xsd";

/// Caller glyph of the original-text footnote.
pub const ORIGINAL_TEXT_CALLER: &str = "+";

/// Caller glyph of the significant-term footnote.
pub const LEXICON_CALLER: &str = "*";

/// Caller used for rendered notes that do not carry their own.
pub const DEFAULT_NOTE_CALLER: &str = "†";
