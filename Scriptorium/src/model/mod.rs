//! Unified book / chapter / verse / word model
//!
//! Both source parsers build these types and the USFX writer reads them.
//! Ownership is strictly downward: a [`Book`] owns its chapters, a
//! [`Chapter`] its verses, a [`Verse`] its words and notes.

mod note;

pub use note::{Note, NoteType};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the canon a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Testament {
    /// Old Testament (Hebrew sources).
    #[default]
    #[serde(rename = "OT")]
    Old,
    /// New Testament (Greek sources).
    #[serde(rename = "NT")]
    New,
}

impl Testament {
    /// Short code as used in the source data (`OT` / `NT`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Old => "OT",
            Self::New => "NT",
        }
    }

    /// Original language of this testament's source text.
    #[must_use]
    pub fn source_language(self) -> SourceLanguage {
        match self {
            Self::Old => SourceLanguage::Hebrew,
            Self::New => SourceLanguage::Greek,
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language label handed to annotators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLanguage {
    Hebrew,
    Greek,
}

impl SourceLanguage {
    /// English name of the language.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hebrew => "Hebrew",
            Self::Greek => "Greek",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Canonical three-letter code (e.g. `RUT`); may be filled in after parsing.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Old or New Testament.
    pub testament: Testament,
    /// 1-based canonical position; 0 until assigned.
    pub book_number: u32,
    /// Chapters in document order.
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Creates an empty book for the given testament.
    #[must_use]
    pub fn new(testament: Testament) -> Self {
        Book {
            testament,
            ..Default::default()
        }
    }

    /// Iterate over every verse of every chapter in document order.
    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.chapters.iter().flat_map(|c| c.verses.iter())
    }

    /// Mutable counterpart of [`Book::verses`].
    pub fn verses_mut(&mut self) -> impl Iterator<Item = &mut Verse> {
        self.chapters.iter_mut().flat_map(|c| c.verses.iter_mut())
    }

    /// Total number of verses across all chapters.
    #[must_use]
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }

    /// Look up a verse by its verbatim source identifier.
    #[must_use]
    pub fn find_verse(&self, verse_id: &str) -> Option<&Verse> {
        self.verses().find(|v| v.verse_id == verse_id)
    }
}

/// A chapter of a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_number: u32,
    /// Verses in document order. Not de-duplicated.
    pub verses: Vec<Verse>,
}

impl Chapter {
    #[must_use]
    pub fn new(chapter_number: u32) -> Self {
        Chapter {
            chapter_number,
            verses: Vec::new(),
        }
    }
}

/// A single verse with its source words and (later) its translation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Dialect-specific identifier, kept verbatim (`Ruth.1.1`, `3 John 1:1`).
    pub verse_id: String,
    pub verse_number: u32,
    /// Surface forms concatenated in document order, no separator inserted.
    pub original_text: String,
    pub words: Vec<Word>,
    /// English translation, `None` until annotated.
    pub translation: Option<String>,
    pub notes: Vec<Note>,
}

impl Verse {
    #[must_use]
    pub fn new(verse_id: impl Into<String>, verse_number: u32) -> Self {
        Verse {
            verse_id: verse_id.into(),
            verse_number,
            ..Default::default()
        }
    }

    /// Append a word, extending `original_text` with its surface form.
    pub fn push_word(&mut self, word: Word) {
        self.original_text.push_str(&word.text);
        self.words.push(word);
    }
}

/// A word of the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Surface form as it appears in the source.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Lexicon id, `H` (Hebrew) or `G` (Greek) prefixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongs_number: Option<String>,
    /// Grammatical code string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morphology: Option<String>,
    /// Dictionary form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Word {
    /// A word carrying only its surface text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Word {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        let mut book = Book::new(Testament::Old);
        let mut chapter = Chapter::new(1);
        for n in 1..=3 {
            chapter.verses.push(Verse::new(format!("Ruth.1.{n}"), n));
        }
        book.chapters.push(chapter);
        book.chapters.push(Chapter::new(2));
        book
    }

    #[test]
    fn test_push_word_extends_original_text() {
        let mut verse = Verse::new("Ruth.1.1", 1);
        verse.push_word(Word::from_text("וַֽ/יְהִ֗י"));
        verse.push_word(Word::from_text("בִּ/ימֵי֙"));
        assert_eq!(verse.original_text, "וַֽ/יְהִ֗יבִּ/ימֵי֙");
        assert_eq!(verse.words.len(), 2);
    }

    #[test]
    fn test_verse_iteration() {
        let mut book = sample_book();
        assert_eq!(book.verse_count(), 3);
        assert!(book.find_verse("Ruth.1.2").is_some());
        assert!(book.find_verse("Ruth.2.1").is_none());

        for verse in book.verses_mut() {
            verse.translation = Some(verse.verse_id.clone());
        }
        assert!(book.verses().all(|v| v.translation.as_deref() == Some(v.verse_id.as_str())));
    }

    #[test]
    fn test_testament_labels() {
        assert_eq!(Testament::Old.to_string(), "OT");
        assert_eq!(Testament::New.source_language(), SourceLanguage::Greek);
        assert_eq!(serde_json::to_string(&Testament::New).unwrap(), "\"NT\"");
    }
}
