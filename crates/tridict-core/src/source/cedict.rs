use std::io::{self, BufRead};
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use super::{DictSource, SourceError};
use crate::lexicon::{ChineseEntry, ChineseWord};
use crate::rank::{estimated_strokes, hsk_level, rank_cedict};
use crate::unicode::strip_bom;

/// CC-CEDICT text source.
///
/// Line format: `TRADITIONAL SIMPLIFIED [PINYIN] /gloss1/gloss2/.../`
/// Lines starting with `#` are comments. Lines that do not match the pattern
/// are skipped without error.
pub struct CedictSource;

fn line_pattern() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    LINE_RE.get_or_init(|| {
        Regex::new(r"^(\S+)\s+(\S+)\s+\[([^\]]*)\]\s+/(.*)/\s*$")
            .expect("CC-CEDICT line regex must be valid")
    })
}

/// Parse a single CC-CEDICT line. Returns `None` for lines to skip.
fn parse_line(line: &str) -> Option<ChineseEntry> {
    let caps = line_pattern().captures(line)?;
    let traditional = &caps[1];
    let simplified = &caps[2];
    let pinyin = caps[3].trim();
    if pinyin.is_empty() {
        return None;
    }

    let glosses: Vec<String> = caps[4]
        .split('/')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();
    if glosses.is_empty() {
        return None;
    }

    let ranking = rank_cedict(simplified, hsk_level(&glosses));

    Some(ChineseEntry {
        word: ChineseWord {
            simplified: simplified.to_string(),
            traditional: traditional.to_string(),
            pinyin: pinyin.to_string(),
            is_common: ranking.is_common,
            frequency_rank: ranking.frequency_rank,
            hsk_level: ranking.level,
            stroke_count: estimated_strokes(simplified),
        },
        definitions: glosses,
    })
}

impl DictSource for CedictSource {
    type Output = Vec<ChineseEntry>;

    fn name(&self) -> &'static str {
        "cedict"
    }

    fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<ChineseEntry>, SourceError> {
        let mut entries = Vec::new();
        let mut total_lines = 0u64;
        let mut skipped = 0u64;

        for line in reader.lines() {
            total_lines += 1;
            let line = match line {
                Ok(l) => l,
                // Invalid UTF-8 affects only this line.
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(SourceError::Io(e)),
            };

            let line = strip_bom(&line);
            if line.trim().is_empty() || line.starts_with('#') {
                skipped += 1;
                continue;
            }

            match parse_line(line) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }

        info!(
            "parsed {} CC-CEDICT entries (skipped {skipped} of {total_lines} lines)",
            entries.len()
        );
        Ok(entries)
    }
}
