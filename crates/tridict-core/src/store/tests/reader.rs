use super::{mao, neko, scratch};
use crate::lexicon::{JapaneseDefinition, Language};
use crate::store::{
    count_rows, max_examples_per_word, open, open_read_only, prune_orphan_examples,
    read_chinese_definitions, read_chinese_word, read_japanese_definitions, read_japanese_word,
    StoreError, StoreWriter, DEFAULT_SCHEMA,
};

#[test]
fn test_japanese_round_trip() {
    let (_dir, path) = scratch();
    let mut writer = StoreWriter::create(&path, DEFAULT_SCHEMA, 100).unwrap();
    let entry = neko();
    let id = writer.write_japanese_entry(&entry).unwrap();

    let mut kana_only = neko();
    kana_only.word.headword = "すし".into();
    kana_only.word.reading = "すし".into();
    kana_only.word.is_common = false;
    kana_only.word.frequency_rank = None;
    kana_only.word.jlpt_level = None;
    kana_only.word.stroke_count = None;
    kana_only.definitions = vec![JapaneseDefinition {
        gloss: "sushi".into(),
        pos: None,
    }];
    let kana_id = writer.write_japanese_entry(&kana_only).unwrap();
    writer.finalize().unwrap();

    let conn = open_read_only(&path).unwrap();
    assert_eq!(read_japanese_word(&conn, id).unwrap(), entry.word);
    assert_eq!(read_japanese_definitions(&conn, id).unwrap(), entry.definitions);
    assert_eq!(read_japanese_word(&conn, kana_id).unwrap(), kana_only.word);
    assert_eq!(
        read_japanese_definitions(&conn, kana_id).unwrap(),
        kana_only.definitions
    );
}

#[test]
fn test_chinese_round_trip() {
    let (_dir, path) = scratch();
    let mut writer = StoreWriter::create(&path, DEFAULT_SCHEMA, 1).unwrap();
    let entry = mao();
    let id = writer.write_chinese_entry(&entry).unwrap();
    writer.finalize().unwrap();

    let conn = open_read_only(&path).unwrap();
    assert_eq!(read_chinese_word(&conn, id).unwrap(), entry.word);
    assert_eq!(read_chinese_definitions(&conn, id).unwrap(), vec!["cat", "feline"]);
}

#[test]
fn test_missing_word() {
    let (_dir, path) = scratch();
    StoreWriter::create(&path, DEFAULT_SCHEMA, 100)
        .unwrap()
        .finalize()
        .unwrap();
    let conn = open(&path).unwrap();
    let err = read_chinese_word(&conn, 7).unwrap_err();
    assert!(matches!(
        err,
        StoreError::MissingWord {
            language: Language::Chinese,
            id: 7
        }
    ));
}

#[test]
fn test_open_missing_store_fails() {
    let (_dir, path) = scratch();
    assert!(open(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_prune_orphan_examples() {
    let (_dir, path) = scratch();
    let mut writer = StoreWriter::create(&path, DEFAULT_SCHEMA, 100).unwrap();
    let ja = writer.write_japanese_entry(&neko()).unwrap();
    let zh = writer.write_chinese_entry(&mao()).unwrap();
    writer.insert_example(Language::Japanese, ja, "猫が好きです。", "I like cats.").unwrap();
    writer.insert_example(Language::Chinese, zh, "我喜欢猫。", "I like cats.").unwrap();
    writer.insert_example(Language::Chinese, zh + 100, "孤儿", "orphan").unwrap();
    writer.insert_example(Language::Japanese, ja + 100, "孤児", "orphan").unwrap();
    writer.finalize().unwrap();

    let conn = open(&path).unwrap();
    assert_eq!(prune_orphan_examples(&conn).unwrap(), 2);
    assert_eq!(count_rows(&conn).unwrap().examples, 2);
    assert_eq!(max_examples_per_word(&conn, Language::Chinese).unwrap(), 1);
}

#[test]
fn test_max_examples_per_word_empty() {
    let (_dir, path) = scratch();
    StoreWriter::create(&path, DEFAULT_SCHEMA, 100)
        .unwrap()
        .finalize()
        .unwrap();
    let conn = open(&path).unwrap();
    assert_eq!(max_examples_per_word(&conn, Language::Japanese).unwrap(), 0);
}
