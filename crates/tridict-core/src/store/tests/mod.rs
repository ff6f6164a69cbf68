mod reader;

use std::path::PathBuf;

use tempfile::TempDir;

use crate::lexicon::{
    ChineseEntry, ChineseWord, HskLevel, JapaneseDefinition, JapaneseEntry, JapaneseWord, JlptLevel,
};

fn scratch() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.sqlite");
    (dir, path)
}

fn neko() -> JapaneseEntry {
    JapaneseEntry {
        word: JapaneseWord {
            headword: "猫".into(),
            reading: "ねこ".into(),
            is_common: true,
            frequency_rank: Some(150),
            jlpt_level: Some(JlptLevel::N3),
            stroke_count: Some(11),
        },
        definitions: vec![JapaneseDefinition {
            gloss: "cat; feline".into(),
            pos: Some("noun".into()),
        }],
    }
}

fn mao() -> ChineseEntry {
    ChineseEntry {
        word: ChineseWord {
            simplified: "猫".into(),
            traditional: "貓".into(),
            pinyin: "mao1".into(),
            is_common: true,
            frequency_rank: Some(100),
            hsk_level: HskLevel::new(3),
            stroke_count: 10,
        },
        definitions: vec!["cat".into(), "feline".into()],
    }
}
