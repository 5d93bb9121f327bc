//! Hebrew word as read from an OSIS `<w>` element

use serde::{Deserialize, Serialize};

use crate::model::Word;

/// Parser-side view of a `<w>` element, before it is folded into a [`Word`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HebrewWord {
    /// Text content of the element.
    pub text: String,
    /// `lemma` attribute (e.g. `"c/1961"`, `"1254 a"`).
    pub lemma: Option<String>,
    /// `morph` attribute.
    pub morphology: Option<String>,
    /// `id` attribute.
    pub id: Option<String>,
    /// `n` attribute (cantillation).
    pub n: Option<String>,
}

impl HebrewWord {
    /// Strong's number derived from the lemma, see [`derive_strongs_number`].
    #[must_use]
    pub fn strongs_number(&self) -> Option<String> {
        self.lemma.as_deref().and_then(derive_strongs_number)
    }

    /// Fold into the shared word model.
    #[must_use]
    pub fn into_word(self) -> Word {
        let strongs_number = self.strongs_number();
        Word {
            text: self.text,
            strongs_number,
            morphology: self.morphology,
            lemma: self.lemma,
            ..Default::default()
        }
    }
}

/// Hebrew Strong's number from a morphhb lemma: `H` followed by the first
/// run of ASCII digits.
///
/// This is a heuristic. A lemma such as `"c/1254 a"` carries a prefix
/// particle and a sense letter; only the first numeric run is kept, and a
/// lemma without digits yields `None`.
#[must_use]
pub fn derive_strongs_number(lemma: &str) -> Option<String> {
    let start = lemma.find(|c: char| c.is_ascii_digit())?;
    let digits: String = lemma[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    Some(format!("H{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_plain_number() {
        assert_eq!(derive_strongs_number("430").as_deref(), Some("H430"));
    }

    #[test]
    fn test_derive_first_run_only() {
        assert_eq!(derive_strongs_number("1254 a").as_deref(), Some("H1254"));
        assert_eq!(derive_strongs_number("c/1961").as_deref(), Some("H1961"));
        assert_eq!(derive_strongs_number("b/3117 c/8199").as_deref(), Some("H3117"));
    }

    #[test]
    fn test_derive_no_digits() {
        assert_eq!(derive_strongs_number("abc"), None);
        assert_eq!(derive_strongs_number(""), None);
    }

    #[test]
    fn test_into_word() {
        let word = HebrewWord {
            text: "אֱלֹהִ֑ים".to_string(),
            lemma: Some("430".to_string()),
            morphology: Some("HNcmpa".to_string()),
            id: Some("01XeN".to_string()),
            n: Some("1.0".to_string()),
        }
        .into_word();

        assert_eq!(word.text, "אֱלֹהִ֑ים");
        assert_eq!(word.strongs_number.as_deref(), Some("H430"));
        assert_eq!(word.morphology.as_deref(), Some("HNcmpa"));
        assert_eq!(word.lemma.as_deref(), Some("430"));
        assert_eq!(word.suffix, None);
    }

    #[test]
    fn test_missing_lemma_has_no_strongs() {
        let word = HebrewWord {
            text: "x".to_string(),
            ..Default::default()
        };
        assert_eq!(word.strongs_number(), None);
    }
}
