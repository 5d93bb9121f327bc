//! Front-matter (FRT) preface book

use std::io::Write;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::options::UsfxOptions;
use super::writer::{end_document, start_document, text_element};
use crate::error::Result;

const PREFACE_TITLE: &str = "Preface to the Free Grace Bible Translation";

/// Serialize a USFX document holding only the preface book.
///
/// The date is a parameter so that output stays reproducible; the CLI
/// passes today's date.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_preface(generated_on: NaiveDate, options: &UsfxOptions) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    start_document(&mut writer, options)?;
    write_preface(&mut writer, generated_on)?;
    writer.write_event(Event::Comment(BytesText::from_escaped(
        " Individual books will be generated separately and combined here ",
    )))?;
    end_document(&mut writer)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

pub(super) fn write_preface<W: Write>(writer: &mut Writer<W>, generated_on: NaiveDate) -> Result<()> {
    writer.write_event(Event::Start(
        BytesStart::new("book").with_attributes([("id", "FRT")]),
    ))?;

    text_element(
        writer,
        BytesStart::new("id").with_attributes([("id", "FRT")]),
        PREFACE_TITLE,
    )?;
    text_element(writer, BytesStart::new("h"), "Preface")?;
    text_element(
        writer,
        BytesStart::new("toc").with_attributes([("level", "1")]),
        "Preface",
    )?;
    text_element(
        writer,
        BytesStart::new("p").with_attributes([("sfm", "mt")]),
        PREFACE_TITLE,
    )?;
    text_element(
        writer,
        BytesStart::new("p").with_attributes([("sfm", "is")]),
        "About the Free Grace Bible Translation",
    )?;
    text_element(
        writer,
        BytesStart::new("p").with_attributes([("sfm", "ip")]),
        &format!(
            "The Free Grace Bible Translation is an AI-assisted translation of the Hebrew and \
             Greek scriptures, developed from a Free Grace and Dispensationalist theological \
             perspective. This translation aims to provide accurate, clear English text while \
             maintaining theological consistency with Free Grace soteriology and \
             Dispensationalist eschatology. Generated on {}.",
            generated_on.format("%Y-%m-%d")
        ),
    )?;
    text_element(
        writer,
        BytesStart::new("p").with_attributes([("sfm", "ip")]),
        "This translation is released under Creative Commons CC0 (public domain) and may be \
         freely copied, distributed, and used without restriction.",
    )?;

    writer.write_event(Event::End(BytesEnd::new("book")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preface_is_dated() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let xml = serialize_preface(date, &UsfxOptions::default()).unwrap();

        assert!(xml.contains(r#"<book id="FRT"><id id="FRT">Preface to the Free Grace Bible Translation</id><h>Preface</h><toc level="1">Preface</toc>"#));
        assert!(xml.contains("Generated on 2025-01-09."));
        assert!(xml.contains("<!-- Individual books will be generated separately and combined here -->"));
        assert!(xml.ends_with("</book><!-- Individual books will be generated separately and combined here --></usfx>"));
    }

    #[test]
    fn test_preface_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let options = UsfxOptions::default();
        assert_eq!(
            serialize_preface(date, &options).unwrap(),
            serialize_preface(date, &options).unwrap()
        );
    }
}
