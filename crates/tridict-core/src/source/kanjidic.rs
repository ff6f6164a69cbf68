use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{info, warn};

use super::xml::xml_err;
use super::{DictSource, SourceError};
use crate::lexicon::{KanjiInfo, KanjiMap};

/// KANJIDIC2 XML source.
///
/// Reads `character/literal`, `character/misc/grade` and
/// `character/misc/stroke_count`. When several stroke counts are listed the
/// first (the accepted count) wins; the rest are common miscounts.
pub struct KanjidicSource;

impl KanjidicSource {
    /// Parse `path` if it exists. A missing file is not an error: it yields an
    /// empty map and stroke counts elsewhere stay undefined.
    pub fn load_optional(&self, path: &Path) -> Result<KanjiMap, SourceError> {
        if !path.exists() {
            warn!(
                "kanji reference {} not found, stroke counts will be empty",
                path.display()
            );
            return Ok(KanjiMap::new());
        }
        self.parse_file(path)
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Literal,
    Grade,
    StrokeCount,
}

impl DictSource for KanjidicSource {
    type Output = KanjiMap;

    fn name(&self) -> &'static str {
        "kanjidic"
    }

    fn parse<R: BufRead>(&self, reader: R) -> Result<KanjiMap, SourceError> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut map: KanjiMap = HashMap::new();
        let mut current: Option<(String, KanjiInfo)> = None;
        let mut field: Option<Field> = None;

        loop {
            match reader.read_event_into(&mut buf).map_err(xml_err)? {
                Event::Start(start) => match start.name().as_ref() {
                    b"character" => current = Some((String::new(), KanjiInfo::default())),
                    b"literal" => field = Some(Field::Literal),
                    b"grade" => field = Some(Field::Grade),
                    b"stroke_count" => field = Some(Field::StrokeCount),
                    _ => field = None,
                },
                Event::Text(t) => {
                    if let (Some(f), Some((literal, info))) = (field, current.as_mut()) {
                        let text = t.unescape().map_err(xml_err)?;
                        let text = text.trim();
                        match f {
                            Field::Literal => literal.push_str(text),
                            Field::Grade => {
                                if info.grade.is_none() {
                                    info.grade = text.parse().ok();
                                }
                            }
                            Field::StrokeCount => {
                                if info.stroke_count.is_none() {
                                    info.stroke_count = text.parse().ok();
                                }
                            }
                        }
                    }
                }
                Event::End(end) => {
                    field = None;
                    if end.name().as_ref() == b"character" {
                        if let Some((literal, info)) = current.take() {
                            if !literal.is_empty() {
                                map.insert(literal, info);
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        info!("parsed {} KANJIDIC2 characters", map.len());
        Ok(map)
    }
}
