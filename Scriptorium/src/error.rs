//! Error types for `Scriptorium`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `Scriptorium` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source document could not be read from disk.
    #[error("failed to read source {path}: {source}")]
    SourceRead {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Parsing Errors ====================
    /// XML parsing or writing error.
    #[error("XML error{}: {source}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Xml {
        /// The source document, when known.
        path: Option<PathBuf>,
        /// The underlying quick-xml error.
        source: quick_xml::Error,
    },

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// A dialect-specific structural assumption was violated.
    #[error("structural error{}: {message}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    StructuralParse {
        /// The source document, when known.
        path: Option<PathBuf>,
        /// What was wrong.
        message: String,
    },

    /// The document root matches neither supported dialect.
    #[error("unrecognized source dialect (root element <{root}>)")]
    UnknownDialect {
        /// Local name of the root element, empty if none was found.
        root: String,
    },

    /// A book code is not in the canon table.
    #[error("unknown book code: {0}")]
    UnknownBook(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Configuration Errors ====================
    /// The pipeline configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    // ==================== Pipeline Errors ====================
    /// A book conversion failed; wraps the underlying cause with context.
    #[error("conversion of {book_id} from {} failed: {source}", .path.display())]
    Conversion {
        /// The book being converted.
        book_id: String,
        /// The source document.
        path: PathBuf,
        /// The underlying failure.
        source: Box<Error>,
    },
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml { path: None, source: err }
    }
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

impl Error {
    /// Attach a source path to parse errors that were raised without one.
    #[must_use]
    pub fn with_path(self, at: impl Into<PathBuf>) -> Self {
        match self {
            Error::Xml { path: None, source } => Error::Xml {
                path: Some(at.into()),
                source,
            },
            Error::StructuralParse {
                path: None,
                message,
            } => Error::StructuralParse {
                path: Some(at.into()),
                message,
            },
            other => other,
        }
    }
}

/// Failure of a single verse annotation.
///
/// Never fatal: the pipeline substitutes a placeholder translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The annotator did not answer within the configured timeout.
    #[error("annotation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The annotator reported a failure.
    #[error("annotation provider error: {0}")]
    Provider(String),

    /// The annotator has nothing for this verse.
    #[error("no translation available for {0}")]
    Missing(String),

    /// The annotation worker went away without answering.
    #[error("annotation worker disconnected")]
    Disconnected,
}

/// A specialized Result type for `Scriptorium` operations.
pub type Result<T> = std::result::Result<T, Error>;
