use std::collections::HashMap;

use super::{HskLevel, JlptLevel};

/// Word-level fields of a Japanese entry, as stored in `japanese_words`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JapaneseWord {
    pub headword: String,
    /// Kana reading. Equal to `headword` for kana-only entries.
    pub reading: String,
    pub is_common: bool,
    pub frequency_rank: Option<u32>,
    pub jlpt_level: Option<JlptLevel>,
    pub stroke_count: Option<u32>,
}

/// One sense: its glosses joined with `"; "` and the leading part of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JapaneseDefinition {
    pub gloss: String,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JapaneseEntry {
    pub word: JapaneseWord,
    pub definitions: Vec<JapaneseDefinition>,
}

/// Word-level fields of a Chinese entry, as stored in `chinese_words`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChineseWord {
    pub simplified: String,
    pub traditional: String,
    /// Pinyin exactly as written in the source (`"mao1"`, `"xue2 xiao4"`).
    pub pinyin: String,
    pub is_common: bool,
    pub frequency_rank: Option<u32>,
    pub hsk_level: Option<HskLevel>,
    /// Placeholder estimate, never null.
    pub stroke_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChineseEntry {
    pub word: ChineseWord,
    /// One gloss per definition row.
    pub definitions: Vec<String>,
}

/// KANJIDIC2 data for a single character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KanjiInfo {
    pub stroke_count: Option<u32>,
    pub grade: Option<u8>,
}

/// Character literal → kanji data.
pub type KanjiMap = HashMap<String, KanjiInfo>;
