//! Verse annotation
//!
//! An [`Annotator`] turns a source verse into an English translation plus
//! critical notes. [`annotate_book`] runs one annotator over every verse of
//! a book in parallel, substituting a placeholder translation for verses
//! whose annotation fails or times out.

mod lexicon;
mod table;

pub use lexicon::lexicon_notes;
pub use table::TranslationTable;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rayon::prelude::*;

use crate::config::AnnotationSettings;
use crate::error::AnnotationError;
use crate::model::{Book, Note, SourceLanguage, Verse};

/// Output of a successful annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub translation: String,
    pub notes: Vec<Note>,
}

impl Annotation {
    #[must_use]
    pub fn new(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }
}

/// Something that can translate and annotate a verse.
///
/// Implementations are shared across worker threads and must not rely on
/// being called in verse order.
pub trait Annotator: Send + Sync {
    /// Annotate one verse.
    ///
    /// # Errors
    /// Any [`AnnotationError`]; the caller recovers with a placeholder.
    fn annotate(
        &self,
        verse: &Verse,
        language: SourceLanguage,
    ) -> Result<Annotation, AnnotationError>;
}

impl<F> Annotator for F
where
    F: Fn(&Verse, SourceLanguage) -> Result<Annotation, AnnotationError> + Send + Sync,
{
    fn annotate(
        &self,
        verse: &Verse,
        language: SourceLanguage,
    ) -> Result<Annotation, AnnotationError> {
        self(verse, language)
    }
}

/// Result of annotating a book
#[derive(Debug, Clone, Default)]
pub struct AnnotationSummary {
    /// Verses that received the annotator's translation
    pub annotated: usize,
    /// Verses that fell back to the placeholder
    pub pending: usize,
    /// One message per failed verse, in no particular order
    pub failures: Vec<String>,
}

impl AnnotationSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.annotated + self.pending
    }
}

/// Annotate every verse of `book` in place.
///
/// See [`annotate_book_with_progress`].
pub fn annotate_book(
    book: &mut Book,
    annotator: &Arc<dyn Annotator>,
    settings: &AnnotationSettings,
) -> AnnotationSummary {
    annotate_book_with_progress(book, annotator, settings, |_, _| {})
}

/// Annotate every verse of `book` in place, reporting progress.
///
/// Verses are processed in parallel; each is written by exactly one task
/// and the call returns only once all of them are done. A failed or timed
/// out verse gets `settings.pending_text(verse_id)` as its translation and
/// no notes. `progress` receives `(done, total)` after each verse.
pub fn annotate_book_with_progress<F>(
    book: &mut Book,
    annotator: &Arc<dyn Annotator>,
    settings: &AnnotationSettings,
    progress: F,
) -> AnnotationSummary
where
    F: Fn(usize, usize) + Send + Sync,
{
    let language = book.testament.source_language();
    let timeout = settings.timeout();
    let verses: Vec<&mut Verse> = book.verses_mut().collect();
    let total = verses.len();

    let annotated = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);

    let failures: Vec<String> = verses
        .into_par_iter()
        .filter_map(|verse| {
            let outcome = match timeout {
                Some(limit) => annotate_with_timeout(annotator, verse, language, limit),
                None => annotate_inline(annotator, verse, language),
            };

            let failure = match outcome {
                Ok(annotation) => {
                    verse.translation = Some(annotation.translation);
                    verse.notes.extend(annotation.notes);
                    annotated.fetch_add(1, Ordering::SeqCst);
                    None
                }
                Err(e) => {
                    tracing::warn!("Annotation of {} failed: {e}", verse.verse_id);
                    verse.translation = Some(settings.pending_text(&verse.verse_id));
                    Some(format!("{}: {e}", verse.verse_id))
                }
            };

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(current, total);
            failure
        })
        .collect();

    let annotated = annotated.load(Ordering::SeqCst);
    tracing::info!(
        "Annotated {annotated}/{total} verses ({} pending)",
        failures.len()
    );

    AnnotationSummary {
        annotated,
        pending: failures.len(),
        failures,
    }
}

/// Run the annotator on the calling worker; a panic counts as a lost provider.
fn annotate_inline(
    annotator: &Arc<dyn Annotator>,
    verse: &Verse,
    language: SourceLanguage,
) -> Result<Annotation, AnnotationError> {
    panic::catch_unwind(AssertUnwindSafe(|| annotator.annotate(verse, language)))
        .unwrap_or(Err(AnnotationError::Disconnected))
}

/// Run one annotation on a dedicated thread and wait at most `limit`.
///
/// A call that overruns is abandoned, not cancelled; its thread finishes in
/// the background and its answer is dropped.
fn annotate_with_timeout(
    annotator: &Arc<dyn Annotator>,
    verse: &Verse,
    language: SourceLanguage,
    limit: Duration,
) -> Result<Annotation, AnnotationError> {
    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(annotator);
    let owned = verse.clone();

    thread::spawn(move || {
        // receiver may be gone after a timeout
        let _ = tx.send(worker.annotate(&owned, language));
    });

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(AnnotationError::Timeout(limit)),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(AnnotationError::Disconnected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, NoteType, Testament};

    fn ruth() -> Book {
        let mut book = Book::new(Testament::Old);
        let mut chapter = Chapter::new(1);
        chapter.verses.push(Verse::new("Ruth.1.1", 1));
        chapter.verses.push(Verse::new("Ruth.1.2", 2));
        book.chapters.push(chapter);
        book
    }

    fn from_fn<F>(f: F) -> Arc<dyn Annotator>
    where
        F: Fn(&Verse, SourceLanguage) -> Result<Annotation, AnnotationError> + Send + Sync + 'static,
    {
        Arc::new(f)
    }

    fn no_timeout() -> AnnotationSettings {
        AnnotationSettings {
            timeout_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_annotates_every_verse() {
        let mut book = ruth();
        let annotator = from_fn(|verse, language| {
            assert_eq!(language, SourceLanguage::Hebrew);
            Ok(Annotation::new(format!("text of {}", verse.verse_id))
                .with_notes(vec![Note::new(NoteType::Footnote, "n")]))
        });

        let summary = annotate_book(&mut book, &annotator, &no_timeout());
        assert_eq!(summary.annotated, 2);
        assert_eq!(summary.pending, 0);

        let verses = &book.chapters[0].verses;
        assert_eq!(verses[0].translation.as_deref(), Some("text of Ruth.1.1"));
        assert_eq!(verses[1].translation.as_deref(), Some("text of Ruth.1.2"));
        assert_eq!(verses[1].notes.len(), 1);
    }

    #[test]
    fn test_failure_becomes_placeholder() {
        let mut book = ruth();
        let annotator = from_fn(|verse, _| {
            if verse.verse_id == "Ruth.1.1" {
                Err(AnnotationError::Provider("offline".to_string()))
            } else {
                Ok(Annotation::new("text two"))
            }
        });

        let summary = annotate_book(&mut book, &annotator, &no_timeout());
        assert_eq!(summary.annotated, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.failures, ["Ruth.1.1: annotation provider error: offline"]);

        let verses = &book.chapters[0].verses;
        assert_eq!(
            verses[0].translation.as_deref(),
            Some("[Translation pending: Ruth.1.1]")
        );
        assert!(verses[0].notes.is_empty());
        assert_eq!(verses[1].translation.as_deref(), Some("text two"));
    }

    #[test]
    fn test_timeout_becomes_placeholder() {
        let mut book = ruth();
        let annotator = from_fn(|verse, _| {
            if verse.verse_id == "Ruth.1.2" {
                thread::sleep(Duration::from_millis(500));
            }
            Ok(Annotation::new("done"))
        });
        let settings = AnnotationSettings {
            timeout_ms: 50,
            ..Default::default()
        };

        let summary = annotate_book(&mut book, &annotator, &settings);
        assert_eq!(summary.pending, 1);

        let verses = &book.chapters[0].verses;
        assert_eq!(verses[0].translation.as_deref(), Some("done"));
        assert_eq!(
            verses[1].translation.as_deref(),
            Some("[Translation pending: Ruth.1.2]")
        );
    }

    #[test]
    fn test_panicking_annotator_is_disconnected() {
        let mut book = ruth();
        let annotator = from_fn(|_, _| panic!("provider crashed"));
        let settings = AnnotationSettings {
            timeout_ms: 5_000,
            pending_template: "PENDING {verse_id}".to_string(),
        };

        let summary = annotate_book(&mut book, &annotator, &settings);
        assert_eq!(summary.pending, 2);
        assert_eq!(
            book.chapters[0].verses[0].translation.as_deref(),
            Some("PENDING Ruth.1.1")
        );
    }

    #[test]
    fn test_panicking_annotator_without_timeout() {
        let mut book = ruth();
        let annotator = from_fn(|verse, _| {
            assert_ne!(verse.verse_id, "Ruth.1.1", "provider crashed");
            Ok(Annotation::default())
        });

        let summary = annotate_book(&mut book, &annotator, &no_timeout());
        assert_eq!(summary.pending, 1);
        assert_eq!(
            book.chapters[0].verses[0].translation.as_deref(),
            Some("[Translation pending: Ruth.1.1]")
        );
        assert!(book.chapters[0].verses[1].translation.is_some());
    }

    #[test]
    fn test_progress_reaches_total() {
        let mut book = ruth();
        let annotator = from_fn(|_, _| Ok(Annotation::new("x")));
        let seen = AtomicUsize::new(0);

        annotate_book_with_progress(&mut book, &annotator, &no_timeout(), |done, total| {
            assert_eq!(total, 2);
            seen.fetch_max(done, Ordering::SeqCst);
        });
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_book() {
        let mut book = Book::new(Testament::New);
        let annotator = from_fn(|_, _| Ok(Annotation::new("x")));
        let summary = annotate_book(&mut book, &annotator, &AnnotationSettings::default());
        assert_eq!(summary.total(), 0);
    }
}
