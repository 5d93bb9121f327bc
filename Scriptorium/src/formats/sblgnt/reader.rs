//! SBLGNT file reading

use std::path::Path;

use super::cursor::{MarkerCursor, MarkerSegment};
use crate::config::StructuralPolicy;
use crate::error::{Error, Result};
use crate::formats::xml::{identifier_number, read_document};
use crate::model::{Book, Chapter, Testament, Verse};

/// Read an SBLGNT file from disk
///
/// # Errors
/// Returns an error if the file cannot be read, has invalid XML, or (under
/// [`StructuralPolicy::Strict`]) carries a malformed marker id.
pub fn read_sblgnt<P: AsRef<Path>>(path: P, policy: StructuralPolicy) -> Result<Book> {
    let path = path.as_ref();
    let content = read_document(path)?;
    let book = parse_sblgnt(&content, policy).map_err(|e| e.with_path(path))?;
    tracing::debug!(
        "Parsed SBLGNT {}: {} chapters, {} verses",
        path.display(),
        book.chapters.len(),
        book.verse_count()
    );
    Ok(book)
}

/// Parse SBLGNT from an XML string
///
/// A new chapter starts whenever a marker's chapter number differs from
/// the chapter most recently started.
pub fn parse_sblgnt(content: &str, policy: StructuralPolicy) -> Result<Book> {
    let mut book = Book::new(Testament::New);
    let mut cursor = MarkerCursor::new(content);

    for segment in cursor.by_ref() {
        let segment = segment?;
        let Some((chapter_number, verse_number)) = parse_reference(&segment.marker_id, policy)?
        else {
            continue;
        };

        if book
            .chapters
            .last()
            .is_none_or(|c| c.chapter_number != chapter_number)
        {
            tracing::debug!("Chapter {chapter_number} starts at {}", segment.marker_id);
            book.chapters.push(Chapter::new(chapter_number));
        }

        if let Some(chapter) = book.chapters.last_mut() {
            chapter.verses.push(into_verse(segment, verse_number));
        }
    }

    book.id = cursor.book_id().unwrap_or_default().to_string();
    book.title = cursor.title().unwrap_or_default().to_string();
    Ok(book)
}

fn into_verse(segment: MarkerSegment, verse_number: u32) -> Verse {
    Verse {
        verse_id: segment.marker_id,
        verse_number,
        original_text: segment.original_text,
        words: segment.words,
        ..Default::default()
    }
}

/// Chapter and verse from a marker id of the form `"<work> <chapter>:<verse>"`.
///
/// The reference is the last whitespace-separated token, so numbered works
/// (`"3 John 1:1"`) parse the same as single-word ones (`"Philemon 1:1"`).
/// Returns `None` for a marker to skip (lenient policy, no reference token).
fn parse_reference(marker_id: &str, policy: StructuralPolicy) -> Result<Option<(u32, u32)>> {
    let tokens: Vec<&str> = marker_id.split_whitespace().collect();
    if tokens.len() < 2 {
        return match policy {
            StructuralPolicy::Strict => Err(Error::StructuralParse {
                path: None,
                message: format!("verse marker '{marker_id}' has no chapter:verse reference"),
            }),
            StructuralPolicy::Lenient => {
                tracing::warn!("Skipping verse marker '{marker_id}' without chapter:verse reference");
                Ok(None)
            }
        };
    }

    let mut parts = tokens[tokens.len() - 1].split(':');
    let chapter = identifier_number(parts.next(), "chapter", marker_id, policy)?;
    let verse = identifier_number(parts.next(), "verse", marker_id, policy)?;
    Ok(Some((chapter, verse)))
}
