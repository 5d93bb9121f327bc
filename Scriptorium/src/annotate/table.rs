//! Annotator backed by a fixed verse → translation table

use std::path::Path;

use indexmap::IndexMap;

use super::{Annotation, Annotator, lexicon_notes};
use crate::config::LexiconAllowList;
use crate::error::{AnnotationError, Error, Result};
use crate::model::{SourceLanguage, Verse};

/// Translations keyed by verbatim verse id.
///
/// Loaded from a flat JSON object (`{"Ruth.1.1": "In the days..."}`). Each
/// annotation also carries [`lexicon_notes`] for the verse's allow-listed
/// words.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    translations: IndexMap<String, String>,
    allow_list: LexiconAllowList,
}

impl TranslationTable {
    #[must_use]
    pub fn new(translations: IndexMap<String, String>, allow_list: LexiconAllowList) -> Self {
        Self {
            translations,
            allow_list,
        }
    }

    /// Parse a table from JSON text.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON object of strings.
    pub fn from_json_str(content: &str, allow_list: LexiconAllowList) -> Result<Self> {
        let translations: IndexMap<String, String> = serde_json::from_str(content)?;
        Ok(Self::new(translations, allow_list))
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P, allow_list: LexiconAllowList) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&content, allow_list)?;
        tracing::debug!(
            "Loaded {} translations from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn insert(&mut self, verse_id: impl Into<String>, translation: impl Into<String>) {
        self.translations.insert(verse_id.into(), translation.into());
    }

    #[must_use]
    pub fn get(&self, verse_id: &str) -> Option<&str> {
        self.translations.get(verse_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            LexiconAllowList::default(),
        )
    }
}

impl Annotator for TranslationTable {
    fn annotate(
        &self,
        verse: &Verse,
        _language: SourceLanguage,
    ) -> std::result::Result<Annotation, AnnotationError> {
        let translation = self
            .get(&verse.verse_id)
            .ok_or_else(|| AnnotationError::Missing(verse.verse_id.clone()))?;
        Ok(Annotation::new(translation).with_notes(lexicon_notes(verse, &self.allow_list)))
    }
}
