//! Commonality, frequency-rank and level heuristics.
//!
//! JMdict carries real priority markers (`ichi1`, `news2`, ...) which map to a
//! rank table. CC-CEDICT has nothing comparable, so its rank is a proxy built
//! from word length and HSK tags found in the glosses. Both proxies are fixed
//! formulas; downstream fixtures pin the exact values.

use crate::lexicon::{HskLevel, JlptLevel};
use crate::unicode::char_len;

/// JMdict priority marker → frequency rank (lower is more frequent).
const PRIORITY_RANKS: &[(&str, u32)] = &[
    ("spec1", 50),
    ("news1", 100),
    ("ichi1", 150),
    ("spec2", 150),
    ("news2", 200),
    ("gai1", 200),
    ("ichi2", 250),
    ("gai2", 300),
];

/// Rank for markers missing from [`PRIORITY_RANKS`] (e.g. `nf01`..`nf48`).
pub const UNLISTED_PRIORITY_RANK: u32 = 1000;

const JLPT_MARKERS: &[(&str, JlptLevel)] = &[
    ("n5", JlptLevel::N5),
    ("n4", JlptLevel::N4),
    ("n3", JlptLevel::N3),
    ("n2", JlptLevel::N2),
    ("n1", JlptLevel::N1),
];

/// HSK level → the two spellings that mark it in a CC-CEDICT gloss.
const HSK_MARKERS: &[(u8, &str, &str)] = &[
    (1, "HSK 1", "HSK1"),
    (2, "HSK 2", "HSK2"),
    (3, "HSK 3", "HSK3"),
    (4, "HSK 4", "HSK4"),
    (5, "HSK 5", "HSK5"),
    (6, "HSK 6", "HSK6"),
];

/// HSK levels that make a CC-CEDICT word common regardless of length.
const COMMON_HSK_MAX: u8 = 3;
/// Words up to this many characters are treated as common.
const COMMON_MAX_CHARS: usize = 2;
const HSK_RANK_STEP: u32 = 200;
const LENGTH_RANK_BASE: u32 = 100;
const LENGTH_RANK_STEP: u32 = 50;
const STROKES_PER_CHAR: u32 = 10;

/// The common (is-common, frequency-rank, level) triple every source maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking<L> {
    pub is_common: bool,
    pub frequency_rank: Option<u32>,
    pub level: Option<L>,
}

/// Rank of a single JMdict priority marker.
pub fn priority_rank(marker: &str) -> u32 {
    PRIORITY_RANKS
        .iter()
        .find(|(m, _)| *m == marker)
        .map_or(UNLISTED_PRIORITY_RANK, |&(_, rank)| rank)
}

/// Minimum rank over `markers`, or `None` if there are no markers.
pub fn frequency_rank<S: AsRef<str>>(markers: &[S]) -> Option<u32> {
    markers.iter().map(|m| priority_rank(m.as_ref())).min()
}

/// First marker, in order, that names a JLPT level.
pub fn jlpt_level<S: AsRef<str>>(markers: &[S]) -> Option<JlptLevel> {
    markers.iter().find_map(|m| {
        JLPT_MARKERS
            .iter()
            .find(|(tag, _)| *tag == m.as_ref())
            .map(|&(_, level)| level)
    })
}

/// Ranking for a JMdict entry from its ordered priority-marker set.
pub fn rank_jmdict<S: AsRef<str>>(markers: &[S]) -> Ranking<JlptLevel> {
    Ranking {
        is_common: !markers.is_empty(),
        frequency_rank: frequency_rank(markers),
        level: jlpt_level(markers),
    }
}

/// Lowest HSK level whose marker appears in any gloss.
///
/// Levels are tried in ascending order, so a gloss list tagged with both
/// `HSK 2` and `HSK 5` resolves to level 2.
pub fn hsk_level<S: AsRef<str>>(glosses: &[S]) -> Option<HskLevel> {
    HSK_MARKERS.iter().find_map(|&(level, spaced, compact)| {
        glosses
            .iter()
            .any(|g| {
                let g = g.as_ref();
                g.contains(spaced) || g.contains(compact)
            })
            .then_some(level)
            .and_then(HskLevel::new)
    })
}

/// Ranking for a CC-CEDICT entry.
///
/// A word is common when it is short or tagged HSK 1-3. Only common words get
/// a rank; an HSK tag overrides the length-based estimate.
pub fn rank_cedict(simplified: &str, hsk: Option<HskLevel>) -> Ranking<HskLevel> {
    let len = char_len(simplified);
    let is_common =
        len <= COMMON_MAX_CHARS || hsk.is_some_and(|level| level.number() <= COMMON_HSK_MAX);

    let frequency_rank = is_common.then(|| match hsk {
        Some(level) => u32::from(level.number()) * HSK_RANK_STEP,
        None => LENGTH_RANK_BASE + (len.saturating_sub(1) as u32) * LENGTH_RANK_STEP,
    });

    Ranking {
        is_common,
        frequency_rank,
        level: hsk,
    }
}

/// Stroke-count placeholder for CC-CEDICT words.
pub fn estimated_strokes(simplified: &str) -> u32 {
    char_len(simplified) as u32 * STROKES_PER_CHAR
}
