//! quick-xml helpers shared by the source parsers

use std::path::Path;

use quick_xml::events::BytesStart;

use crate::config::StructuralPolicy;
use crate::error::{Error, Result};

/// Read a whole source document, tagging IO failures with the path.
pub(crate) fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Unescaped value of the attribute named `key`, if present.
pub(crate) fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Check that a document ended with its root element closed.
///
/// quick-xml reports `Eof` on truncated input without complaint, so the
/// parsers track their own depth and call this when they reach the end.
pub(crate) fn check_complete(depth: usize, seen_root: bool) -> Result<()> {
    if !seen_root {
        return Err(Error::StructuralParse {
            path: None,
            message: "unexpected end of document, no root element".to_string(),
        });
    }
    if depth != 0 {
        return Err(Error::StructuralParse {
            path: None,
            message: format!("unexpected end of document, {depth} elements unclosed"),
        });
    }
    Ok(())
}

/// Parse one numeric segment of a verse or chapter identifier.
///
/// Under [`StructuralPolicy::Lenient`] a missing or non-numeric segment
/// becomes 0; under `Strict` it is an error.
pub(crate) fn identifier_number(
    segment: Option<&str>,
    what: &str,
    identifier: &str,
    policy: StructuralPolicy,
) -> Result<u32> {
    match segment.map(|s| s.trim().parse::<u32>()) {
        Some(Ok(n)) => Ok(n),
        _ => match policy {
            StructuralPolicy::Strict => Err(Error::StructuralParse {
                path: None,
                message: format!("{what} number missing or malformed in identifier '{identifier}'"),
            }),
            StructuralPolicy::Lenient => {
                tracing::warn!("{what} number missing or malformed in '{identifier}', using 0");
                Ok(0)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_complete() {
        assert!(check_complete(0, true).is_ok());
        let err = check_complete(2, true).unwrap_err();
        assert!(err.to_string().contains("2 elements unclosed"));
        assert!(matches!(check_complete(0, false), Err(Error::StructuralParse { .. })));
    }

    #[test]
    fn test_identifier_number() {
        assert_eq!(
            identifier_number(Some("12"), "verse", "Ruth.1.12", StructuralPolicy::Strict).unwrap(),
            12
        );
        assert_eq!(
            identifier_number(Some("x"), "verse", "Ruth.1.x", StructuralPolicy::Lenient).unwrap(),
            0
        );
        assert_eq!(
            identifier_number(None, "chapter", "Ruth", StructuralPolicy::Lenient).unwrap(),
            0
        );

        let err = identifier_number(None, "chapter", "Ruth", StructuralPolicy::Strict).unwrap_err();
        assert_eq!(
            err.to_string(),
            "structural error: chapter number missing or malformed in identifier 'Ruth'"
        );
    }

    #[test]
    fn test_attribute_unescapes() {
        let mut start = BytesStart::new("w");
        start.push_attribute(("lemma", "a&b"));
        assert_eq!(attribute(&start, b"lemma").unwrap().as_deref(), Some("a&b"));
        assert_eq!(attribute(&start, b"morph").unwrap(), None);
    }
}
