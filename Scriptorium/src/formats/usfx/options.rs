//! Writer options

use crate::config::{LexiconAllowList, PipelineConfig};

/// Settings for the USFX writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsfxOptions {
    /// Content of `languageCode`.
    pub language_code: String,
    /// Text of each book's `id` element.
    pub id_description: String,
    /// Verse body for verses without a translation.
    pub missing_translation: String,
    /// Also render each verse's notes.
    pub render_notes: bool,
    /// Lexicon ids that earn a `*` footnote.
    pub allow_list: LexiconAllowList,
}

impl UsfxOptions {
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            language_code: config.output.language_code.clone(),
            id_description: config.output.id_description.clone(),
            missing_translation: config.output.missing_translation.clone(),
            render_notes: config.output.render_notes,
            allow_list: config.lexicon.clone(),
        }
    }
}

impl Default for UsfxOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
