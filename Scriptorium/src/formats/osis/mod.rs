//! OSIS (morphhb) source format
//!
//! Word-per-element Hebrew text. Chapters and verses are containers whose
//! `osisID` attribute carries the `Work.Chapter[.Verse]` address.

mod reader;
mod word;

pub use reader::{parse_osis, read_osis};
pub use word::{HebrewWord, derive_strongs_number};
