//! Critical notes attached to verses

use serde::{Deserialize, Serialize};

/// Kind of critical note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteType {
    Footnote,
    CrossReference,
    TextualVariant,
    Morphological,
    Theological,
}

/// An annotation on a verse, distinct from its translation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub note_type: NoteType,
    /// Marker glyph (`+`, `*`, `†`, ...). Empty when the writer should pick one.
    #[serde(default)]
    pub caller: String,
    pub content: String,
    /// Cross-reference destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Manuscript witness for textual variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_manuscript: Option<String>,
    /// Lexicon id for morphological notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongs_number: Option<String>,
    /// Source-language text the note is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Reading preferred over `original_text` for textual variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_reading: Option<String>,
}

impl Note {
    /// Creates a note with no caller and no optional fields.
    #[must_use]
    pub fn new(note_type: NoteType, content: impl Into<String>) -> Self {
        Note {
            note_type,
            caller: String::new(),
            content: content.into(),
            target: None,
            source_manuscript: None,
            strongs_number: None,
            original_text: None,
            preferred_reading: None,
        }
    }

    /// A cross-reference pointing at `target`.
    #[must_use]
    pub fn cross_reference(target: impl Into<String>, content: impl Into<String>) -> Self {
        Note {
            target: Some(target.into()),
            ..Note::new(NoteType::CrossReference, content)
        }
    }

    #[must_use]
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = caller.into();
        self
    }
}
