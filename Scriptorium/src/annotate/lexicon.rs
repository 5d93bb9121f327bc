//! Morphological notes for lexically significant words

use crate::config::LexiconAllowList;
use crate::model::{Note, NoteType, Verse};

/// One morphological note per word whose Strong's number is allow-listed,
/// in word order.
///
/// Content is `Strong's {id}: {morphology}`, with an empty morphology when
/// the word has none.
#[must_use]
pub fn lexicon_notes(verse: &Verse, allow_list: &LexiconAllowList) -> Vec<Note> {
    verse
        .words
        .iter()
        .filter_map(|word| {
            let id = word.strongs_number.as_deref()?;
            allow_list.contains(id).then(|| Note {
                strongs_number: Some(id.to_string()),
                original_text: Some(word.text.clone()),
                ..Note::new(
                    NoteType::Morphological,
                    format!(
                        "Strong's {id}: {}",
                        word.morphology.as_deref().unwrap_or_default()
                    ),
                )
            })
        })
        .collect()
}
