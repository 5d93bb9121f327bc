//! Book conversion pipeline
//!
//! read → parse → apply book metadata → annotate → serialize, one book at a
//! time, plus a parallel batch driver that writes each book to its own file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::annotate::{AnnotationSummary, Annotator, annotate_book_with_progress};
use crate::canon::{self, CanonBook};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::formats::{Dialect, UsfxOptions, read_source, serialize_usfx};
use crate::model::Book;

/// Identity assigned to a parsed book before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    /// USFX book code (`RUT`)
    pub id: String,
    /// Display title (`Ruth`)
    pub title: String,
    /// Canonical position (8)
    pub book_number: u32,
}

impl BookMetadata {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, book_number: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            book_number,
        }
    }

    /// Metadata for a canonical book named by code, abbreviation or title.
    ///
    /// # Errors
    /// [`Error::UnknownBook`] if the name is not in the canon table.
    pub fn from_code(code: &str) -> Result<Self> {
        canon::lookup(code)
            .map(Self::from)
            .ok_or_else(|| Error::UnknownBook(code.to_string()))
    }

    pub fn apply_to(&self, book: &mut Book) {
        book.id.clone_from(&self.id);
        book.title.clone_from(&self.title);
        book.book_number = self.book_number;
    }
}

impl From<&CanonBook> for BookMetadata {
    fn from(canon: &CanonBook) -> Self {
        Self::new(canon.code, canon.title, canon.number)
    }
}

/// Stage of a book conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    /// Reading and parsing the source document
    Parsing,
    /// Annotating verses (`current`/`total` count verses)
    Annotating,
    /// Serializing the USFX document
    Writing,
    /// Conversion finished
    Complete,
}

impl ConvertPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parsing => "Parsing source",
            Self::Annotating => "Annotating verses",
            Self::Writing => "Writing USFX",
            Self::Complete => "Complete",
        }
    }
}

/// Progress information during a conversion
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    /// Current phase
    pub phase: ConvertPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Item being processed (book id or source path)
    pub current_item: Option<String>,
}

impl ConvertProgress {
    #[must_use]
    pub fn new(phase: ConvertPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_item: None,
        }
    }

    #[must_use]
    pub fn with_item(
        phase: ConvertPhase,
        current: usize,
        total: usize,
        item: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_item: Some(item.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// One book to convert.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub source: PathBuf,
    /// Force a dialect instead of detecting it from the root element.
    pub dialect: Option<Dialect>,
    /// Book identity; inferred from the source when `None`.
    pub metadata: Option<BookMetadata>,
}

impl ConvertRequest {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dialect: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: BookMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Book id used in error context before the book is parsed.
    fn context_id(&self) -> String {
        match &self.metadata {
            Some(metadata) => metadata.id.clone(),
            None => self
                .source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }
}

/// A converted book
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The annotated book
    pub book: Book,
    /// Dialect the source was parsed as
    pub dialect: Dialect,
    /// The serialized USFX document
    pub usfx: String,
    /// Annotation outcome
    pub summary: AnnotationSummary,
}

/// Parse a source file into a book with its metadata applied.
///
/// # Errors
/// Any read or parse error, or [`Error::UnknownBook`] when no metadata was
/// given and the book cannot be identified.
pub fn load_book(request: &ConvertRequest, config: &PipelineConfig) -> Result<(Dialect, Book)> {
    let (dialect, mut book) = read_source(&request.source, request.dialect, config.parsing.policy)?;

    let metadata = match &request.metadata {
        Some(metadata) => metadata.clone(),
        None => canon::infer(&book)
            .map(BookMetadata::from)
            .ok_or_else(|| Error::UnknownBook(request.context_id()))?,
    };
    metadata.apply_to(&mut book);

    tracing::info!(
        "Parsed {} ({}) from {}: {} chapters, {} verses",
        book.id,
        dialect,
        request.source.display(),
        book.chapters.len(),
        book.verse_count()
    );
    Ok((dialect, book))
}

/// Convert one book end to end.
///
/// Annotation failures never abort the conversion; they show up as
/// placeholder translations and in [`Conversion::summary`].
///
/// # Errors
/// [`Error::Conversion`] wrapping the read, parse, identification or
/// serialization failure.
pub fn convert_book<F>(
    request: &ConvertRequest,
    annotator: &Arc<dyn Annotator>,
    config: &PipelineConfig,
    progress: F,
) -> Result<Conversion>
where
    F: Fn(&ConvertProgress) + Send + Sync,
{
    let wrap = |source: Error| Error::Conversion {
        book_id: request.context_id(),
        path: request.source.clone(),
        source: Box::new(source),
    };

    progress(&ConvertProgress::with_item(
        ConvertPhase::Parsing,
        0,
        1,
        request.source.to_string_lossy(),
    ));
    let (dialect, mut book) = load_book(request, config).map_err(wrap)?;

    let summary = annotate_book_with_progress(
        &mut book,
        annotator,
        &config.annotation,
        |current, total| {
            progress(&ConvertProgress::new(ConvertPhase::Annotating, current, total));
        },
    );

    progress(&ConvertProgress::with_item(
        ConvertPhase::Writing,
        0,
        1,
        book.id.as_str(),
    ));
    let usfx = serialize_usfx(&book, &UsfxOptions::from_config(config)).map_err(wrap)?;
    tracing::info!("Serialized {} ({} bytes)", book.id, usfx.len());

    progress(&ConvertProgress::with_item(
        ConvertPhase::Complete,
        1,
        1,
        book.id.as_str(),
    ));

    Ok(Conversion {
        book,
        dialect,
        usfx,
        summary,
    })
}

/// Write `content` to `dir/filename`, creating `dir` if needed.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file written.
pub fn save_output(content: &str, dir: &Path, filename: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, content)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Output file name for a converted book (`RUT.usfx.xml`).
#[must_use]
pub fn output_filename(book_id: &str) -> String {
    format!("{book_id}.usfx.xml")
}

/// Result of a batch conversion
#[derive(Debug, Clone)]
pub struct BatchConvertResult {
    /// Number of books converted and written
    pub success_count: usize,
    /// Number of books that failed
    pub fail_count: usize,
    /// One message per request, in request order
    pub results: Vec<String>,
}

/// Convert several books in parallel, writing each to
/// `output_dir/<ID>.usfx.xml`.
///
/// A failing book is reported and does not stop the others.
pub fn batch_convert<F>(
    requests: &[ConvertRequest],
    output_dir: &Path,
    annotator: &Arc<dyn Annotator>,
    config: &PipelineConfig,
    progress: F,
) -> BatchConvertResult
where
    F: Fn(&ConvertProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = requests.len();

    let results: Vec<String> = requests
        .par_iter()
        .map(|request| {
            let display_path = request.source.to_string_lossy().to_string();

            let outcome = convert_book(request, annotator, config, |_| {}).and_then(|conversion| {
                let path = save_output(
                    &conversion.usfx,
                    output_dir,
                    &output_filename(&conversion.book.id),
                )?;
                Ok((conversion, path))
            });

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&ConvertProgress::with_item(
                ConvertPhase::Complete,
                current,
                total,
                display_path.clone(),
            ));

            match outcome {
                Ok((conversion, path)) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    format!(
                        "Converted: {display_path} -> {} ({} verses, {} pending)",
                        path.display(),
                        conversion.summary.total(),
                        conversion.summary.pending
                    )
                }
                Err(e) => {
                    tracing::error!("{e}");
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Failed {display_path}: {e}")
                }
            }
        })
        .collect();

    BatchConvertResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::TranslationTable;
    use std::sync::Mutex;

    const RUTH: &str = r#"<osis><osisText><div type="book" osisID="Ruth">
<title>Ruth</title>
<chapter osisID="Ruth.1">
<verse osisID="Ruth.1.1"><w lemma="1961" morph="HVqw3ms">וַיְהִי</w></verse>
<verse osisID="Ruth.1.2"><w lemma="8034" morph="HNcmsc">וְשֵׁם</w></verse>
</chapter></div></osisText></osis>"#;

    fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn table() -> Arc<dyn Annotator> {
        Arc::new(
            [("Ruth.1.1", "text one")]
                .into_iter()
                .collect::<TranslationTable>(),
        )
    }

    fn config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.annotation.timeout_ms = 0;
        config
    }

    #[test]
    fn test_metadata_from_code() {
        let metadata = BookMetadata::from_code("3JN").unwrap();
        assert_eq!(metadata, BookMetadata::new("3JN", "3 John", 64));
        assert!(matches!(
            BookMetadata::from_code("XYZ"),
            Err(Error::UnknownBook(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn test_convert_infers_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_fixture(dir.path(), "Ruth.xml", RUTH);

        let conversion = convert_book(&ConvertRequest::new(&source), &table(), &config(), |_| {})
            .unwrap();

        assert_eq!(conversion.dialect, Dialect::Osis);
        assert_eq!(conversion.book.id, "RUT");
        assert_eq!(conversion.book.book_number, 8);
        assert_eq!(conversion.summary.annotated, 1);
        assert_eq!(conversion.summary.pending, 1);
        assert!(conversion.usfx.contains("text one"));
        assert!(conversion.usfx.contains("[Translation pending: Ruth.1.2]"));
    }

    #[test]
    fn test_convert_reports_phases() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_fixture(dir.path(), "Ruth.xml", RUTH);
        let phases = Mutex::new(Vec::new());

        convert_book(&ConvertRequest::new(&source), &table(), &config(), |p| {
            phases.lock().unwrap().push(p.phase);
        })
        .unwrap();

        let phases = phases.into_inner().unwrap();
        assert_eq!(phases.first(), Some(&ConvertPhase::Parsing));
        assert_eq!(phases.last(), Some(&ConvertPhase::Complete));
        assert_eq!(
            phases.iter().filter(|p| **p == ConvertPhase::Annotating).count(),
            2
        );
    }

    #[test]
    fn test_convert_wraps_errors() {
        let request = ConvertRequest::new("/nonexistent/Ruth.xml")
            .with_metadata(BookMetadata::new("RUT", "Ruth", 8));

        let err = convert_book(&request, &table(), &config(), |_| {}).unwrap_err();
        let Error::Conversion { book_id, source, .. } = err else {
            panic!("expected conversion error");
        };
        assert_eq!(book_id, "RUT");
        assert!(matches!(*source, Error::SourceRead { .. }));
    }

    #[test]
    fn test_unidentifiable_book() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_fixture(
            dir.path(),
            "Tobit.xml",
            r#"<osis><chapter osisID="Tob.1"><verse osisID="Tob.1.1"/></chapter></osis>"#,
        );

        let err = convert_book(&ConvertRequest::new(&source), &table(), &config(), |_| {})
            .unwrap_err();
        let Error::Conversion { book_id, source, .. } = err else {
            panic!("expected conversion error");
        };
        assert_eq!(book_id, "Tobit");
        assert!(matches!(*source, Error::UnknownBook(_)));
    }

    #[test]
    fn test_batch_convert() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_fixture(dir.path(), "Ruth.xml", RUTH);
        let out = dir.path().join("out");
        let requests = [
            ConvertRequest::new(&source),
            ConvertRequest::new(dir.path().join("missing.xml")),
        ];

        let result = batch_convert(&requests, &out, &table(), &config(), |_| {});
        assert_eq!(result.success_count, 1);
        assert_eq!(result.fail_count, 1);
        assert!(result.results[0].starts_with("Converted:"));
        assert!(result.results[1].starts_with("Failed"));
        assert!(out.join("RUT.usfx.xml").is_file());
    }

    #[test]
    fn test_progress_percentage() {
        assert!((ConvertProgress::new(ConvertPhase::Annotating, 1, 4).percentage() - 0.25).abs() < f32::EPSILON);
        assert!((ConvertProgress::new(ConvertPhase::Complete, 0, 0).percentage() - 1.0).abs() < f32::EPSILON);
    }
}
