//! Pipeline configuration (scriptorium.toml)
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock behaviour.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_language_code() -> String {
    "eng".to_string()
}

fn default_id_description() -> String {
    "Free Grace Bible Translation".to_string()
}

fn default_missing_translation() -> String {
    "[Translation needed]".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_pending_template() -> String {
    "[Translation pending: {verse_id}]".to_string()
}

fn default_significant() -> BTreeSet<String> {
    LexiconAllowList::default().significant
}

/// The full pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub annotation: AnnotationSettings,
    #[serde(default)]
    pub lexicon: LexiconAllowList,
    #[serde(default)]
    pub parsing: ParsingSettings,
}

impl PipelineConfig {
    /// Load a configuration file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// USFX writer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Content of the `languageCode` element.
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// Descriptive text of the book's `id` element.
    #[serde(default = "default_id_description")]
    pub id_description: String,
    /// Verse body written when a verse has no translation.
    #[serde(default = "default_missing_translation")]
    pub missing_translation: String,
    /// Render the verse's own notes after the built-in footnotes.
    #[serde(default)]
    pub render_notes: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            id_description: default_id_description(),
            missing_translation: default_missing_translation(),
            render_notes: false,
        }
    }
}

/// Annotation step settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSettings {
    /// Per-verse timeout in milliseconds; 0 disables it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Placeholder for failed verses. `{verse_id}` is substituted.
    #[serde(default = "default_pending_template")]
    pub pending_template: String,
}

impl AnnotationSettings {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Placeholder translation for a verse whose annotation failed.
    #[must_use]
    pub fn pending_text(&self, verse_id: &str) -> String {
        self.pending_template.replace("{verse_id}", verse_id)
    }
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            pending_template: default_pending_template(),
        }
    }
}

/// What to do when a verse or chapter identifier is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralPolicy {
    /// Fail the whole parse.
    #[default]
    Strict,
    /// Default the number to 0 (or skip the marker) and log a warning.
    Lenient,
}

/// Source parser settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingSettings {
    #[serde(default)]
    pub policy: StructuralPolicy,
}

/// Lexicon ids considered theologically significant.
///
/// Shared by the USFX writer (the `*` footnote) and the lexicon note
/// generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconAllowList {
    #[serde(default = "default_significant")]
    pub significant: BTreeSet<String>,
}

impl LexiconAllowList {
    /// Stock list: Elohim, YHWH, hesed, agape, pistis, charis, zoe, aionios.
    pub const DEFAULT_IDS: [&'static str; 8] =
        ["H430", "H3068", "H2617", "G26", "G4102", "G5485", "G2222", "G166"];

    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            significant: ids.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, strongs_number: &str) -> bool {
        self.significant.contains(strongs_number)
    }
}

impl Default for LexiconAllowList {
    fn default() -> Self {
        Self::new(Self::DEFAULT_IDS)
    }
}
