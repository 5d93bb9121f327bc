//! OSIS file reading

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::word::HebrewWord;
use crate::config::StructuralPolicy;
use crate::error::Result;
use crate::formats::xml::{attribute, check_complete, identifier_number, read_document};
use crate::model::{Book, Chapter, Testament, Verse};

/// Read an OSIS file from disk
///
/// # Errors
/// Returns an error if the file cannot be read, has invalid XML, or (under
/// [`StructuralPolicy::Strict`]) carries a malformed `osisID`.
pub fn read_osis<P: AsRef<Path>>(path: P, policy: StructuralPolicy) -> Result<Book> {
    let path = path.as_ref();
    let content = read_document(path)?;
    let book = parse_osis(&content, policy).map_err(|e| e.with_path(path))?;
    tracing::debug!(
        "Parsed OSIS {}: {} chapters, {} verses",
        path.display(),
        book.chapters.len(),
        book.verse_count()
    );
    Ok(book)
}

/// Parse OSIS from an XML string
///
/// The title is the text of the first `title` element anywhere in the
/// document; chapters come from every `chapter` element in document order.
/// Element names are matched by local name, so a prefixed OSIS namespace
/// is accepted too.
pub fn parse_osis(content: &str, policy: StructuralPolicy) -> Result<Book> {
    let mut reader = Reader::from_str(content);
    // Word text is kept exactly as written
    reader.trim_text(false);

    let mut book = Book::new(Testament::Old);
    let mut state = OsisState::new(policy);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                state.open(&e)?;
                state.depth += 1;
            }
            Event::Empty(e) => {
                state.open(&e)?;
                state.close(&mut book);
            }
            Event::End(_) => {
                state.depth = state.depth.saturating_sub(1);
                state.close(&mut book);
            }
            Event::Text(e) => state.text(&e.unescape()?),
            Event::CData(e) => state.text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    check_complete(state.depth, state.seen_root)?;

    book.title = state.title.unwrap_or_default();
    Ok(book)
}

/// Open containers while walking the event stream.
///
/// Each `Option<(depth, _)>` remembers the depth its element opened at, so
/// the matching end tag can be recognised without a full element stack.
struct OsisState {
    policy: StructuralPolicy,
    depth: usize,
    seen_root: bool,
    title: Option<String>,
    title_capture: Option<(usize, String)>,
    chapter: Option<(usize, Chapter)>,
    verse: Option<(usize, Verse)>,
    word: Option<(usize, HebrewWord)>,
}

impl OsisState {
    fn new(policy: StructuralPolicy) -> Self {
        Self {
            policy,
            depth: 0,
            seen_root: false,
            title: None,
            title_capture: None,
            chapter: None,
            verse: None,
            word: None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let depth = self.depth;
        self.seen_root = true;
        match e.local_name().as_ref() {
            b"title" if self.title.is_none() && self.title_capture.is_none() => {
                self.title_capture = Some((depth, String::new()));
            }
            b"chapter" if self.chapter.is_none() => {
                let osis_id = attribute(e, b"osisID")?.unwrap_or_default();
                let number =
                    identifier_number(osis_id.split('.').nth(1), "chapter", &osis_id, self.policy)?;
                tracing::debug!("Chapter {osis_id}");
                self.chapter = Some((depth, Chapter::new(number)));
            }
            b"verse" if self.chapter.is_some() && self.verse.is_none() => {
                let osis_id = attribute(e, b"osisID")?.unwrap_or_default();
                let number =
                    identifier_number(osis_id.split('.').nth(2), "verse", &osis_id, self.policy)?;
                self.verse = Some((depth, Verse::new(osis_id, number)));
            }
            b"w" if self.verse.is_some() && self.word.is_none() => {
                let word = HebrewWord {
                    text: String::new(),
                    lemma: attribute(e, b"lemma")?,
                    morphology: attribute(e, b"morph")?,
                    id: attribute(e, b"id")?,
                    n: attribute(e, b"n")?,
                };
                self.word = Some((depth, word));
            }
            _ => {}
        }
        Ok(())
    }

    /// Close whatever container opened at the current depth.
    fn close(&mut self, book: &mut Book) {
        let depth = self.depth;

        if self.title_capture.as_ref().is_some_and(|(d, _)| *d == depth) {
            self.title = self.title_capture.take().map(|(_, t)| t);
        }

        if self.word.as_ref().is_some_and(|(d, _)| *d == depth) {
            if let (Some((_, word)), Some((_, verse))) = (self.word.take(), self.verse.as_mut()) {
                verse.push_word(word.into_word());
            }
        } else if self.verse.as_ref().is_some_and(|(d, _)| *d == depth) {
            if let (Some((_, verse)), Some((_, chapter))) = (self.verse.take(), self.chapter.as_mut()) {
                chapter.verses.push(verse);
            }
        } else if self.chapter.as_ref().is_some_and(|(d, _)| *d == depth) {
            if let Some((_, chapter)) = self.chapter.take() {
                book.chapters.push(chapter);
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, title)) = self.title_capture.as_mut() {
            title.push_str(text);
        }
        if let Some((_, word)) = self.word.as_mut() {
            word.text.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const RUTH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<osis xmlns="http://www.bibletechnologies.net/2003/OSIS/namespace">
  <osisText osisIDWork="WLC" osisRefWork="wlc" xml:lang="he">
    <header>
      <work osisWork="WLC"><title>Westminster Leningrad Codex</title></work>
    </header>
    <div type="book" osisID="Ruth">
      <chapter osisID="Ruth.1">
        <verse osisID="Ruth.1.1"><w lemma="c/1961" morph="HC/Vqw3ms" id="08Nvk">וַֽ/יְהִ֗י</w> <w lemma="b/3117" n="1.0" morph="HR/Ncmpc" id="08N7y">בִּ/ימֵי֙</w><seg type="x-sof-pasuq">׃</seg></verse>
        <verse osisID="Ruth.1.2"><w lemma="c/8034" morph="HC/Ncmsc" id="08Nlm">וְ/שֵׁ֣ם</w></verse>
      </chapter>
      <chapter osisID="Ruth.2">
        <verse osisID="Ruth.2.1"><w lemma="430" morph="HNcmpa">אֱלֹהִ֑ים</w></verse>
      </chapter>
    </div>
  </osisText>
</osis>"#;

    #[test]
    fn test_parse_structure() {
        let book = parse_osis(RUTH, StructuralPolicy::Strict).unwrap();

        assert_eq!(book.testament, Testament::Old);
        assert_eq!(book.title, "Westminster Leningrad Codex");
        assert_eq!(book.chapters.len(), 2);
        assert_eq!(book.chapters[0].chapter_number, 1);
        assert_eq!(book.chapters[1].chapter_number, 2);
        assert_eq!(book.chapters[0].verses.len(), 2);
        assert_eq!(book.chapters[0].verses[1].verse_number, 2);
        assert_eq!(book.chapters[1].verses[0].verse_id, "Ruth.2.1");
    }

    #[test]
    fn test_parse_words() {
        let book = parse_osis(RUTH, StructuralPolicy::Strict).unwrap();
        let verse = &book.chapters[0].verses[0];

        assert_eq!(verse.verse_id, "Ruth.1.1");
        assert_eq!(verse.words.len(), 2);
        // whitespace and <seg> between words are not part of the text
        assert_eq!(verse.original_text, "וַֽ/יְהִ֗יבִּ/ימֵי֙");
        assert_eq!(verse.words[0].strongs_number.as_deref(), Some("H1961"));
        assert_eq!(verse.words[1].morphology.as_deref(), Some("HR/Ncmpc"));
        assert_eq!(verse.words[1].lemma.as_deref(), Some("b/3117"));

        let elohim = &book.chapters[1].verses[0].words[0];
        assert_eq!(elohim.strongs_number.as_deref(), Some("H430"));
    }

    #[test]
    fn test_no_title() {
        let content = r#"<osis><chapter osisID="Jonah.1"><verse osisID="Jonah.1.1"/></chapter></osis>"#;
        let book = parse_osis(content, StructuralPolicy::Strict).unwrap();
        assert_eq!(book.title, "");
        assert_eq!(book.chapters[0].verses.len(), 1);
        assert!(book.chapters[0].verses[0].words.is_empty());
        assert_eq!(book.chapters[0].verses[0].original_text, "");
    }

    #[test]
    fn test_prefixed_namespace() {
        let content = r#"<o:osis xmlns:o="http://www.bibletechnologies.net/2003/OSIS/namespace">
<o:chapter osisID="Ruth.3"><o:verse osisID="Ruth.3.4"><o:w lemma="1254 a">ברא</o:w></o:verse></o:chapter></o:osis>"#;
        let book = parse_osis(content, StructuralPolicy::Strict).unwrap();
        assert_eq!(book.chapters[0].chapter_number, 3);
        assert_eq!(book.chapters[0].verses[0].verse_number, 4);
        assert_eq!(
            book.chapters[0].verses[0].words[0].strongs_number.as_deref(),
            Some("H1254")
        );
    }

    #[test]
    fn test_malformed_osis_id_strict() {
        let content = r#"<osis><chapter osisID="Ruth"><verse osisID="Ruth.1.1"/></chapter></osis>"#;
        let err = parse_osis(content, StructuralPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::StructuralParse { .. }));
    }

    #[test]
    fn test_malformed_osis_id_lenient() {
        let content = r#"<osis><chapter osisID="Ruth"><verse osisID="Ruth.1"/><verse/></chapter></osis>"#;
        let book = parse_osis(content, StructuralPolicy::Lenient).unwrap();
        assert_eq!(book.chapters[0].chapter_number, 0);
        assert_eq!(book.chapters[0].verses[0].verse_number, 0);
        assert_eq!(book.chapters[0].verses[0].verse_id, "Ruth.1");
        assert_eq!(book.chapters[0].verses[1].verse_id, "");
    }

    #[test]
    fn test_malformed_xml() {
        let content = r#"<osis><chapter osisID="Ruth.1"><verse osisID="Ruth.1.1"></chapter></osis>"#;
        let err = parse_osis(content, StructuralPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::Xml { .. }));
    }

    #[test]
    fn test_truncated_document() {
        let content = r#"<osis><chapter osisID="Ruth.1"><verse osisID="Ruth.1.1"><w lemma="430">a</w></verse><verse osisID="Ruth.1.2"><w>b</w>"#;
        let err = parse_osis(content, StructuralPolicy::Lenient).unwrap_err();
        assert!(matches!(err, Error::StructuralParse { .. }));
        assert!(err.to_string().contains("3 elements unclosed"));

        let err = parse_osis("", StructuralPolicy::Lenient).unwrap_err();
        assert!(matches!(err, Error::StructuralParse { .. }));
    }

    #[test]
    fn test_escaped_word_text() {
        let content = r#"<osis><chapter osisID="X.1"><verse osisID="X.1.1"><w>a&amp;b</w><w><![CDATA[<c>]]></w></verse></chapter></osis>"#;
        let book = parse_osis(content, StructuralPolicy::Strict).unwrap();
        assert_eq!(book.chapters[0].verses[0].original_text, "a&b<c>");
    }
}
