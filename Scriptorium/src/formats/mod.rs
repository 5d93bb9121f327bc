//! Source and output format handlers
//!
//! - [`osis`] - Hebrew OSIS (morphhb), one element per word, verses addressed
//!   by `osisID` attributes
//! - [`sblgnt`] - Greek SBLGNT, paragraph oriented, verses delimited by
//!   sibling `verse-number` markers
//! - [`usfx`] - annotated USFX output

pub mod osis;
pub mod sblgnt;
pub mod usfx;
mod xml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::config::StructuralPolicy;
use crate::error::{Error, Result};
use crate::model::Book;

pub use osis::{HebrewWord, derive_strongs_number, parse_osis, read_osis};
pub use sblgnt::{MarkerCursor, MarkerSegment, parse_sblgnt, read_sblgnt};
pub use usfx::{UsfxOptions, serialize_collection, serialize_preface, serialize_usfx, write_usfx};

/// The two supported source dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// OSIS XML with `<w>` per word (Hebrew Masoretic text).
    Osis,
    /// SBLGNT XML with `<verse-number>` markers (Greek New Testament).
    Sblgnt,
}

impl Dialect {
    /// Identify the dialect from the document's root element.
    pub fn detect(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e) | Event::Empty(e)) => {
                    return match e.local_name().as_ref() {
                        b"osis" => Ok(Self::Osis),
                        b"book" => Ok(Self::Sblgnt),
                        other => Err(Error::UnknownDialect {
                            root: String::from_utf8_lossy(other).into_owned(),
                        }),
                    };
                }
                Ok(Event::Eof) => {
                    return Err(Error::UnknownDialect {
                        root: String::new(),
                    });
                }
                Err(e) => return Err(e.into()),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Parse `content` with this dialect's parser.
    pub fn parse(self, content: &str, policy: StructuralPolicy) -> Result<Book> {
        match self {
            Self::Osis => parse_osis(content, policy),
            Self::Sblgnt => parse_sblgnt(content, policy),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Osis => "osis",
            Self::Sblgnt => "sblgnt",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "osis" | "hebrew" | "morphhb" | "wlc" => Ok(Self::Osis),
            "sblgnt" | "greek" => Ok(Self::Sblgnt),
            _ => Err(format!(
                "Invalid dialect '{s}'. Valid values: osis/hebrew/morphhb/wlc, sblgnt/greek"
            )),
        }
    }
}

/// Read a source file and parse it, detecting the dialect unless one is given.
///
/// # Errors
/// [`Error::SourceRead`](crate::Error::SourceRead) if the file cannot be
/// read, otherwise any parse error tagged with `path`.
pub fn read_source<P: AsRef<Path>>(
    path: P,
    dialect: Option<Dialect>,
    policy: StructuralPolicy,
) -> Result<(Dialect, Book)> {
    let path = path.as_ref();
    let content = xml::read_document(path)?;
    let dialect = match dialect {
        Some(dialect) => dialect,
        None => Dialect::detect(&content).map_err(|e| e.with_path(path))?,
    };
    let book = dialect.parse(&content, policy).map_err(|e| e.with_path(path))?;
    Ok((dialect, book))
}
