//! # Scriptorium
//!
//! Parsing of Hebrew (OSIS, morphhb/WLC) and Greek (SBLGNT) source texts into
//! a common book/chapter/verse/word model, verse annotation, and annotated
//! USFX output.
//!
//! ## Supported Formats
//!
//! - **OSIS** - Hebrew Old Testament with lemma and morphology per word
//! - **SBLGNT** - Greek New Testament, flat verse markers with word siblings
//! - **USFX** - Output, with original-text and lexicon footnotes per verse
//!
//! ## Quick Start
//!
//! ### Converting a Book
//!
//! ```no_run
//! use std::sync::Arc;
//! use scriptorium::prelude::*;
//!
//! let config = PipelineConfig::default();
//! let table = TranslationTable::load("ruth.json", config.lexicon.clone())?;
//! let annotator: Arc<dyn Annotator> = Arc::new(table);
//!
//! let request = ConvertRequest::new("Ruth.xml").with_metadata(BookMetadata::from_code("RUT")?);
//! let conversion = convert_book(&request, &annotator, &config, |_| {})?;
//! std::fs::write("RUT.usfx.xml", conversion.usfx)?;
//! # Ok::<(), scriptorium::Error>(())
//! ```
//!
//! ### Parsing Only
//!
//! ```no_run
//! use scriptorium::config::StructuralPolicy;
//! use scriptorium::formats::read_sblgnt;
//!
//! let book = read_sblgnt("3John.xml", StructuralPolicy::Strict)?;
//! println!("{} verses", book.verse_count());
//! # Ok::<(), scriptorium::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `scriptorium` command-line binary

pub mod annotate;
pub mod canon;
pub mod config;
pub mod error;
pub mod formats;
pub mod model;
pub mod pipeline;

// Re-exports for convenience
pub use error::{AnnotationError, Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{AnnotationError, Error, Result};
    pub use crate::model::{Book, Chapter, Note, NoteType, SourceLanguage, Testament, Verse, Word};
    pub use crate::config::{LexiconAllowList, PipelineConfig, StructuralPolicy};

    // Source parsing and output
    pub use crate::formats::{
        Dialect, UsfxOptions, parse_osis, parse_sblgnt, read_osis, read_sblgnt, read_source,
        serialize_collection, serialize_preface, serialize_usfx, write_usfx,
    };

    // Annotation
    pub use crate::annotate::{
        Annotation, AnnotationSummary, Annotator, TranslationTable, annotate_book, lexicon_notes,
    };

    // Pipeline
    pub use crate::pipeline::{
        BatchConvertResult, BookMetadata, Conversion, ConvertPhase, ConvertProgress,
        ConvertRequest, batch_convert, convert_book,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
