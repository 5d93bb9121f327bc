//! Lazy walk over `verse-number` markers and their following siblings

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;
use crate::formats::xml::{attribute, check_complete};
use crate::model::Word;

/// A marker together with the content that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSegment {
    /// The marker's `id` attribute, verbatim (e.g. `"3 John 1:1"`).
    pub marker_id: String,
    /// One word per `<w>` sibling; `suffix` holds the `<suffix>` text that followed it.
    pub words: Vec<Word>,
    /// Text of all `<w>` and `<suffix>` siblings in document order.
    pub original_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiblingKind {
    Word,
    Suffix,
}

/// A sibling whose text content is being collected.
struct Capture {
    kind: SiblingKind,
    depth: usize,
    text: String,
}

/// Iterator over the marker segments of an SBLGNT document.
///
/// Only markers inside a `<p>` are reported. The walk is finite and single
/// pass; re-scanning requires a new cursor. The root `id` and the first
/// `<title>` are picked up along the way and available from
/// [`MarkerCursor::book_id`] / [`MarkerCursor::title`] once seen.
pub struct MarkerCursor<'a> {
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
    depth: usize,
    paragraph_depths: Vec<usize>,
    seen_root: bool,
    book_id: Option<String>,
    title: Option<String>,
    title_capture: Option<(usize, String)>,
    /// Open segment and the depth of its marker.
    open: Option<(usize, MarkerSegment)>,
    capture: Option<Capture>,
    finished: bool,
}

impl<'a> MarkerCursor<'a> {
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        // <suffix> is usually a single space
        reader.trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            depth: 0,
            paragraph_depths: Vec::new(),
            seen_root: false,
            book_id: None,
            title: None,
            title_capture: None,
            open: None,
            capture: None,
            finished: false,
        }
    }

    /// `id` attribute of the root element.
    pub fn book_id(&self) -> Option<&str> {
        self.book_id.as_deref()
    }

    /// Text of the first `<title>` element.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Handle an opening (or self-closing) tag. May complete the open segment.
    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<Option<MarkerSegment>> {
        let depth = self.depth;

        if !self.seen_root {
            self.seen_root = true;
            self.book_id = attribute(e, b"id")?;
            return Ok(None);
        }

        match e.local_name().as_ref() {
            b"title" if self.title.is_none() && self.title_capture.is_none() => {
                self.title_capture = Some((depth, String::new()));
            }
            b"p" => self.paragraph_depths.push(depth),
            b"verse-number" if !self.paragraph_depths.is_empty() => {
                let marker_id = attribute(e, b"id")?.unwrap_or_default();
                let next = MarkerSegment {
                    marker_id,
                    ..Default::default()
                };
                self.capture = None;
                return Ok(self.open.replace((depth, next)).map(|(_, done)| done));
            }
            b"w" | b"suffix" if self.capture.is_none() => {
                if self.open.as_ref().is_some_and(|(d, _)| *d == depth) {
                    let kind = if e.local_name().as_ref() == b"w" {
                        SiblingKind::Word
                    } else {
                        SiblingKind::Suffix
                    };
                    self.capture = Some(Capture {
                        kind,
                        depth,
                        text: String::new(),
                    });
                }
            }
            _ => {}
        }
        Ok(None)
    }

    /// Handle the end of the element at the current depth.
    fn close_element(&mut self) -> Option<MarkerSegment> {
        let depth = self.depth;

        if self.title_capture.as_ref().is_some_and(|(d, _)| *d == depth) {
            self.title = self.title_capture.take().map(|(_, t)| t);
        }

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let (Some(capture), Some((_, segment))) = (self.capture.take(), self.open.as_mut()) {
                segment.original_text.push_str(&capture.text);
                match capture.kind {
                    SiblingKind::Word => segment.words.push(Word::from_text(capture.text)),
                    SiblingKind::Suffix => {
                        if let Some(word) = segment.words.last_mut() {
                            word.suffix.get_or_insert_with(String::new).push_str(&capture.text);
                        }
                    }
                }
            }
        }

        if self.paragraph_depths.last() == Some(&depth) {
            self.paragraph_depths.pop();
        }

        // The marker's parent closed: no more siblings
        if self.open.as_ref().is_some_and(|(d, _)| *d == depth + 1) {
            return self.open.take().map(|(_, segment)| segment);
        }
        None
    }

    fn text(&mut self, text: &str) {
        if let Some((_, title)) = self.title_capture.as_mut() {
            title.push_str(text);
        }
        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
    }

    fn step(&mut self) -> Result<Option<MarkerSegment>> {
        loop {
            let event = self.reader.read_event_into(&mut self.buf)?.into_owned();
            self.buf.clear();

            let done = match event {
                Event::Start(e) => {
                    let done = self.open_element(&e)?;
                    self.depth += 1;
                    done
                }
                Event::Empty(e) => {
                    let opened = self.open_element(&e)?;
                    let closed = self.close_element();
                    opened.or(closed)
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                    self.close_element()
                }
                Event::Text(e) => {
                    self.text(&e.unescape()?);
                    None
                }
                Event::CData(e) => {
                    self.text(&String::from_utf8_lossy(&e));
                    None
                }
                Event::Eof => {
                    self.finished = true;
                    check_complete(self.depth, self.seen_root)?;
                    return Ok(self.open.take().map(|(_, segment)| segment));
                }
                _ => None,
            };

            if done.is_some() {
                return Ok(done);
            }
        }
    }
}

impl Iterator for MarkerCursor<'_> {
    type Item = Result<MarkerSegment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(segment)) => Some(Ok(segment)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHILEMON: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<book id="Phm">
  <title>ΠΡΟΣ ΦΙΛΗΜΟΝΑ</title>
  <p>
    <verse-number id="Philemon 1:1">1:1</verse-number>
    <w>Παῦλος</w>
    <suffix> </suffix>
    <w>δέσμιος</w><suffix>, </suffix>
    <verse-number id="Philemon 1:2">1:2</verse-number>
    <w>καὶ</w>
    <suffix> </suffix>
  </p>
  <p>
    <w>orphan</w>
    <verse-number id="Philemon 1:3">1:3</verse-number>
    <w>χάρις</w>
  </p>
</book>"#;

    #[test]
    fn test_segments_in_document_order() {
        let segments: Vec<_> = MarkerCursor::new(PHILEMON)
            .collect::<Result<_>>()
            .unwrap();

        let ids: Vec<_> = segments.iter().map(|s| s.marker_id.as_str()).collect();
        assert_eq!(ids, ["Philemon 1:1", "Philemon 1:2", "Philemon 1:3"]);
    }

    #[test]
    fn test_segment_content() {
        let segments: Vec<_> = MarkerCursor::new(PHILEMON)
            .collect::<Result<_>>()
            .unwrap();

        let first = &segments[0];
        assert_eq!(first.original_text, "Παῦλος δέσμιος, ");
        assert_eq!(first.words.len(), 2);
        assert_eq!(first.words[0].text, "Παῦλος");
        assert_eq!(first.words[0].suffix.as_deref(), Some(" "));
        assert_eq!(first.words[1].suffix.as_deref(), Some(", "));
        assert_eq!(first.words[0].strongs_number, None);

        // siblings in the next paragraph before its first marker belong to no verse
        assert_eq!(segments[1].original_text, "καὶ ");
        assert_eq!(segments[2].original_text, "χάρις");
    }

    #[test]
    fn test_header_fields() {
        let mut cursor = MarkerCursor::new(PHILEMON);
        for segment in cursor.by_ref() {
            segment.unwrap();
        }
        assert_eq!(cursor.book_id(), Some("Phm"));
        assert_eq!(cursor.title(), Some("ΠΡΟΣ ΦΙΛΗΜΟΝΑ"));
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_markers_outside_paragraphs_ignored() {
        let content = r#"<book id="X"><verse-number id="X 1:1"/><w>a</w><p><verse-number id="X 1:2"/><w>b</w></p></book>"#;
        let segments: Vec<_> = MarkerCursor::new(content).collect::<Result<_>>().unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].marker_id, "X 1:2");
        assert_eq!(segments[0].original_text, "b");
    }

    #[test]
    fn test_marker_with_no_content() {
        let content = r#"<book id="X"><p><verse-number id="X 1:1"/><verse-number id="X 1:2"/><w>b</w></p></book>"#;
        let segments: Vec<_> = MarkerCursor::new(content).collect::<Result<_>>().unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].words.is_empty());
        assert_eq!(segments[0].original_text, "");
        assert_eq!(segments[1].original_text, "b");
    }

    #[test]
    fn test_nested_words_not_siblings() {
        let content = r#"<book id="X"><p><verse-number id="X 1:1"/><span><w>hidden</w></span><w>seen</w></p></book>"#;
        let segments: Vec<_> = MarkerCursor::new(content).collect::<Result<_>>().unwrap();
        assert_eq!(segments[0].original_text, "seen");
    }

    #[test]
    fn test_error_stops_iteration() {
        let content = r#"<book id="X"><p><verse-number id="X 1:1"/><w>a</p></book>"#;
        let mut cursor = MarkerCursor::new(content);
        assert!(matches!(cursor.next(), Some(Err(_))));
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_truncated_document_errors() {
        let content = r#"<book id="3Jn"><p><verse-number id="3 John 1:1"/><w>a</w><verse-number id="3 John 1:2"/><w>b</w>"#;
        let results: Vec<_> = MarkerCursor::new(content).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().marker_id, "3 John 1:1");
        assert!(results[1].is_err());
    }
}
