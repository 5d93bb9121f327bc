//! USFX file writing

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::options::UsfxOptions;
use super::preface::write_preface;
use super::{
    DEFAULT_NOTE_CALLER, LEXICON_CALLER, ORIGINAL_TEXT_CALLER, USFX_NAMESPACE,
    USFX_SCHEMA_LOCATION,
};
use crate::error::Result;
use crate::model::{Book, Chapter, Note, NoteType, Verse};

/// Write a book as USFX to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_usfx<P: AsRef<Path>>(book: &Book, options: &UsfxOptions, path: P) -> Result<()> {
    let xml = serialize_usfx(book, options)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize one book to a USFX document
///
/// # Errors
/// Returns an error if XML serialization fails; nothing is returned then.
pub fn serialize_usfx(book: &Book, options: &UsfxOptions) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    start_document(&mut writer, options)?;
    write_book(&mut writer, book, options)?;
    end_document(&mut writer)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Serialize several books into one USFX document, optionally preceded by
/// the preface dated `preface_date`.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_collection(
    books: &[Book],
    preface_date: Option<NaiveDate>,
    options: &UsfxOptions,
) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    start_document(&mut writer, options)?;
    if let Some(date) = preface_date {
        write_preface(&mut writer, date)?;
    }
    for book in books {
        write_book(&mut writer, book, options)?;
    }
    end_document(&mut writer)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// XML declaration, `<usfx>` and `<languageCode>`.
pub(super) fn start_document<W: Write>(writer: &mut Writer<W>, options: &UsfxOptions) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("usfx");
    root.push_attribute(("xmlns:xsi", USFX_NAMESPACE));
    root.push_attribute(("xsi:noNamespaceSchemaLocation", USFX_SCHEMA_LOCATION));
    writer.write_event(Event::Start(root))?;

    text_element(writer, BytesStart::new("languageCode"), &options.language_code)
}

pub(super) fn end_document<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new("usfx")))?;
    Ok(())
}

/// Character data escaped the way XML stream writers do: only `<`, `>` and `&`.
pub(super) fn char_data(text: &str) -> BytesText<'_> {
    BytesText::from_escaped(partial_escape(text))
}

/// `<name attrs>text</name>`
pub(super) fn text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(char_data(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_book<W: Write>(writer: &mut Writer<W>, book: &Book, options: &UsfxOptions) -> Result<()> {
    let code = book.id.to_uppercase();

    let mut book_tag = BytesStart::new("book");
    book_tag.push_attribute(("id", code.as_str()));
    writer.write_event(Event::Start(book_tag))?;

    // Book identification and headings
    text_element(
        writer,
        BytesStart::new("id").with_attributes([("id", code.as_str())]),
        &options.id_description,
    )?;
    text_element(writer, BytesStart::new("h"), &book.title)?;
    text_element(
        writer,
        BytesStart::new("toc").with_attributes([("level", "1")]),
        &book.title,
    )?;
    text_element(
        writer,
        BytesStart::new("toc").with_attributes([("level", "2")]),
        &book.title,
    )?;
    text_element(
        writer,
        BytesStart::new("toc").with_attributes([("level", "3")]),
        &code,
    )?;
    text_element(
        writer,
        BytesStart::new("p").with_attributes([("sfm", "mt")]),
        &book.title,
    )?;

    for chapter in &book.chapters {
        write_chapter(writer, chapter, options)?;
    }

    writer.write_event(Event::End(BytesEnd::new("book")))?;
    Ok(())
}

fn write_chapter<W: Write>(
    writer: &mut Writer<W>,
    chapter: &Chapter,
    options: &UsfxOptions,
) -> Result<()> {
    let number = chapter.chapter_number.to_string();
    writer.write_event(Event::Empty(
        BytesStart::new("c").with_attributes([("id", number.as_str())]),
    ))?;

    writer.write_event(Event::Start(BytesStart::new("p")))?;
    for verse in &chapter.verses {
        let number = verse.verse_number.to_string();
        writer.write_event(Event::Empty(
            BytesStart::new("v").with_attributes([("id", number.as_str())]),
        ))?;

        write_verse_body(writer, verse, options)?;

        writer.write_event(Event::Empty(BytesStart::new("ve")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("p")))?;
    Ok(())
}

/// Translation text followed by the verse's footnotes.
fn write_verse_body<W: Write>(
    writer: &mut Writer<W>,
    verse: &Verse,
    options: &UsfxOptions,
) -> Result<()> {
    let text = verse
        .translation
        .as_deref()
        .unwrap_or(&options.missing_translation);
    writer.write_event(Event::Text(char_data(text)))?;

    if !verse.original_text.is_empty() {
        write_footnote(
            writer,
            ORIGINAL_TEXT_CALLER,
            &format!("Original text: {}", verse.original_text),
        )?;
    }

    // Only the first significant word gets a footnote
    let significant = verse.words.iter().find_map(|word| {
        word.strongs_number
            .as_deref()
            .filter(|id| options.allow_list.contains(id))
            .map(|id| (id, word))
    });
    if let Some((strongs, word)) = significant {
        write_footnote(
            writer,
            LEXICON_CALLER,
            &format!(
                "Strong's {strongs}: {} (Morphology: {})",
                word.text,
                word.morphology.as_deref().unwrap_or("N/A")
            ),
        )?;
    }

    if options.render_notes {
        for note in &verse.notes {
            write_note(writer, note)?;
        }
    }
    Ok(())
}

fn write_footnote<W: Write>(writer: &mut Writer<W>, caller: &str, content: &str) -> Result<()> {
    text_element(
        writer,
        BytesStart::new("f").with_attributes([("caller", caller)]),
        content,
    )
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &Note) -> Result<()> {
    let caller = if note.caller.is_empty() {
        DEFAULT_NOTE_CALLER
    } else {
        note.caller.as_str()
    };

    match (note.note_type, note.target.as_deref()) {
        (NoteType::CrossReference, Some(target)) => {
            writer.write_event(Event::Start(
                BytesStart::new("x").with_attributes([("caller", caller)]),
            ))?;
            text_element(
                writer,
                BytesStart::new("ref").with_attributes([("tgt", target)]),
                &note.content,
            )?;
            writer.write_event(Event::End(BytesEnd::new("x")))?;
            Ok(())
        }
        _ => write_footnote(writer, caller, &note.content),
    }
}
