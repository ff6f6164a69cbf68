//! Shared quick-xml plumbing for the JMdict and KANJIDIC2 readers.

use std::collections::HashMap;
use std::sync::OnceLock;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, BytesText};
use regex::Regex;
use tracing::debug;

use super::SourceError;

pub(super) fn xml_err(e: impl std::fmt::Display) -> SourceError {
    SourceError::Xml(e.to_string())
}

/// Collect `<!ENTITY name "value">` declarations from a DOCTYPE internal subset.
///
/// JMdict spells part-of-speech and misc tags as entity references
/// (`<pos>&n;</pos>`), so the declarations are needed to expand them.
pub(super) fn parse_entity_decls(doctype: &str) -> HashMap<String, String> {
    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
    let re = ENTITY_RE.get_or_init(|| {
        Regex::new(r#"<!ENTITY\s+([^\s%]+)\s+"([^"]*)"\s*>"#).expect("entity regex must be valid")
    });
    re.captures_iter(doctype)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// Unescape a text node, expanding DTD-declared entities and the five
/// predefined XML escapes (`&amp;`, `&lt;`, ...).
///
/// Text with an undeclared entity is kept verbatim rather than failing the
/// whole file.
pub(super) fn text_with_entities(text: &BytesText<'_>, entities: &HashMap<String, String>) -> String {
    match text.unescape_with(|name| {
        entities
            .get(name)
            .map(String::as_str)
            .or_else(|| resolve_predefined_entity(name))
    }) {
        Ok(s) => s.into_owned(),
        Err(e) => {
            let raw = String::from_utf8_lossy(text).into_owned();
            debug!("keeping raw text {raw:?}: {e}");
            raw
        }
    }
}

/// Value of attribute `key`, if present and well-formed.
pub(super) fn attribute(start: &BytesStart<'_>, key: &str) -> Option<String> {
    match start.try_get_attribute(key) {
        Ok(Some(attr)) => Some(String::from_utf8_lossy(attr.value.as_ref()).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_decls() {
        let dtd = r#"JMdict [
<!ELEMENT JMdict (entry*)>
<!ENTITY n "noun (common) (futsuumeishi)">
<!ENTITY v5r "Godan verb with 'ru' ending">
<!ENTITY % param "ignored">
]"#;
        let entities = parse_entity_decls(dtd);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities["n"], "noun (common) (futsuumeishi)");
        assert_eq!(entities["v5r"], "Godan verb with 'ru' ending");
    }

    #[test]
    fn test_text_with_entities() {
        let mut entities = HashMap::new();
        entities.insert("n".to_string(), "noun (common)".to_string());

        let text = BytesText::from_escaped("&n;");
        assert_eq!(text_with_entities(&text, &entities), "noun (common)");

        let text = BytesText::from_escaped("cats &amp; dogs");
        assert_eq!(text_with_entities(&text, &entities), "cats & dogs");

        let text = BytesText::from_escaped("&unknown;");
        assert_eq!(text_with_entities(&text, &entities), "&unknown;");
    }
}
