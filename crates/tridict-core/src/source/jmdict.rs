use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, debug_span, info};

use super::xml::{attribute, parse_entity_decls, text_with_entities, xml_err};
use super::{DictSource, SourceError};
use crate::lexicon::{JapaneseDefinition, JapaneseEntry, JapaneseWord, KanjiMap};
use crate::rank::rank_jmdict;

const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// JMdict XML source.
///
/// Element layout per `<entry>`: `k_ele/keb`, `k_ele/ke_pri`, `r_ele/reb`,
/// `r_ele/re_pri`, `sense/pos`, `sense/gloss`. Everything else is ignored.
/// Stroke counts come from the KANJIDIC2 map keyed by headword.
pub struct JmdictSource<'a> {
    kanji: &'a KanjiMap,
    progress_interval: usize,
}

impl<'a> JmdictSource<'a> {
    pub fn new(kanji: &'a KanjiMap) -> Self {
        Self {
            kanji,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Log a progress line every `interval` entries.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    fn build_entry(&self, raw: RawEntry) -> Option<JapaneseEntry> {
        let reading = raw.readings.into_iter().next()?;
        let headword = raw
            .kanji
            .into_iter()
            .next()
            .unwrap_or_else(|| reading.clone());

        let definitions: Vec<JapaneseDefinition> = raw
            .senses
            .into_iter()
            .filter(|sense| !sense.glosses.is_empty())
            .map(|sense| JapaneseDefinition {
                gloss: sense.glosses.join("; "),
                pos: sense.pos.first().and_then(|p| strip_qualifiers(p)),
            })
            .collect();
        if definitions.is_empty() {
            return None;
        }

        let ranking = rank_jmdict(&raw.priorities);
        let stroke_count = self.kanji.get(&headword).and_then(|k| k.stroke_count);

        Some(JapaneseEntry {
            word: JapaneseWord {
                headword,
                reading,
                is_common: ranking.is_common,
                frequency_rank: ranking.frequency_rank,
                jlpt_level: ranking.level,
                stroke_count,
            },
            definitions,
        })
    }
}

/// Element whose text is being collected.
#[derive(Debug, Clone, Copy)]
enum Field {
    Kanji,
    Reading,
    Priority,
    Pos,
    Gloss,
}

#[derive(Debug, Default)]
struct RawSense {
    pos: Vec<String>,
    glosses: Vec<String>,
}

#[derive(Debug, Default)]
struct RawEntry {
    kanji: Vec<String>,
    readings: Vec<String>,
    /// Ordered set: encounter order, no duplicates.
    priorities: Vec<String>,
    senses: Vec<RawSense>,
}

impl RawEntry {
    fn push(&mut self, field: Field, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match field {
            Field::Kanji => self.kanji.push(text.to_string()),
            Field::Reading => self.readings.push(text.to_string()),
            Field::Priority => {
                if !self.priorities.iter().any(|p| p == text) {
                    self.priorities.push(text.to_string());
                }
            }
            Field::Pos => {
                if let Some(sense) = self.senses.last_mut() {
                    sense.pos.push(text.to_string());
                }
            }
            Field::Gloss => {
                if let Some(sense) = self.senses.last_mut() {
                    sense.glosses.push(text.to_string());
                }
            }
        }
    }
}

/// `"noun (common) (futsuumeishi)"` → `"noun"`. Empty results become `None`.
fn strip_qualifiers(pos: &str) -> Option<String> {
    let base = pos.split('(').next().unwrap_or_default().trim();
    (!base.is_empty()).then(|| base.to_string())
}

/// Glosses without `xml:lang` are English; multilingual files tag the rest.
fn is_english(lang: Option<&str>) -> bool {
    matches!(lang, None | Some("eng"))
}

impl DictSource for JmdictSource<'_> {
    type Output = Vec<JapaneseEntry>;

    fn name(&self) -> &'static str {
        "jmdict"
    }

    fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<JapaneseEntry>, SourceError> {
        let _span = debug_span!("parse_jmdict").entered();

        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut entities: HashMap<String, String> = HashMap::new();
        let mut entries = Vec::new();
        let mut current: Option<RawEntry> = None;
        let mut field: Option<Field> = None;
        let mut text = String::new();
        let mut seen = 0usize;

        loop {
            match reader.read_event_into(&mut buf).map_err(xml_err)? {
                Event::DocType(dtd) => {
                    entities = parse_entity_decls(&String::from_utf8_lossy(&dtd));
                    debug!("loaded {} DTD entities", entities.len());
                }
                Event::Start(start) => {
                    let name = start.name();
                    match name.as_ref() {
                        b"entry" => current = Some(RawEntry::default()),
                        b"sense" => {
                            if let Some(entry) = current.as_mut() {
                                entry.senses.push(RawSense::default());
                            }
                        }
                        tag => {
                            field = match tag {
                                b"keb" => Some(Field::Kanji),
                                b"reb" => Some(Field::Reading),
                                b"ke_pri" | b"re_pri" => Some(Field::Priority),
                                b"pos" => Some(Field::Pos),
                                b"gloss" if is_english(attribute(&start, "xml:lang").as_deref()) => {
                                    Some(Field::Gloss)
                                }
                                _ => None,
                            }
                            .filter(|_| current.is_some());
                            text.clear();
                        }
                    }
                }
                Event::Text(t) => {
                    if field.is_some() {
                        text.push_str(&text_with_entities(&t, &entities));
                    }
                }
                Event::CData(t) => {
                    if field.is_some() {
                        text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Event::End(end) => {
                    if end.name().as_ref() == b"entry" {
                        if let Some(raw) = current.take() {
                            seen += 1;
                            if let Some(entry) = self.build_entry(raw) {
                                entries.push(entry);
                            }
                            if seen % self.progress_interval == 0 {
                                debug!("parsed {seen} JMdict entries ({} kept)", entries.len());
                            }
                        }
                    } else if let Some(f) = field.take() {
                        if let Some(entry) = current.as_mut() {
                            entry.push(f, &text);
                        }
                        text.clear();
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        info!(
            "parsed {seen} JMdict entries, kept {} (dropped {})",
            entries.len(),
            seen - entries.len()
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_qualifiers() {
        assert_eq!(
            strip_qualifiers("noun (common) (futsuumeishi)").as_deref(),
            Some("noun")
        );
        assert_eq!(
            strip_qualifiers("Godan verb with 'ru' ending").as_deref(),
            Some("Godan verb with 'ru' ending")
        );
        assert_eq!(strip_qualifiers("(archaic)"), None);
        assert_eq!(strip_qualifiers("  "), None);
    }

    #[test]
    fn test_is_english() {
        assert!(is_english(None));
        assert!(is_english(Some("eng")));
        assert!(!is_english(Some("ger")));
    }

    #[test]
    fn test_priority_set_keeps_first_occurrence() {
        let mut raw = RawEntry::default();
        raw.push(Field::Priority, "news1");
        raw.push(Field::Priority, "ichi1");
        raw.push(Field::Priority, "news1");
        raw.push(Field::Priority, " ");
        assert_eq!(raw.priorities, vec!["news1", "ichi1"]);
    }
}
