//! SBLGNT source format
//!
//! Paragraph-oriented Greek text. Verses are not containers: a
//! `<verse-number>` marker owns the `<w>` and `<suffix>` siblings that follow
//! it, up to the next marker or the end of the enclosing paragraph.

mod cursor;
mod reader;

pub use cursor::{MarkerCursor, MarkerSegment};
pub use reader::{parse_sblgnt, read_sblgnt};
