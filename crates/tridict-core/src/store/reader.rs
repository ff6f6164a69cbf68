use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::StoreError;
use crate::lexicon::{ChineseWord, HskLevel, JapaneseDefinition, JapaneseWord, JlptLevel, Language};

/// Row count of every table in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub japanese_words: u64,
    pub japanese_definitions: u64,
    pub chinese_words: u64,
    pub chinese_definitions: u64,
    pub examples: u64,
}

fn count(conn: &Connection, sql: &str) -> Result<u64, StoreError> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n.max(0) as u64)
}

pub fn count_rows(conn: &Connection) -> Result<RowCounts, StoreError> {
    Ok(RowCounts {
        japanese_words: count(conn, "SELECT COUNT(*) FROM japanese_words")?,
        japanese_definitions: count(conn, "SELECT COUNT(*) FROM japanese_definitions")?,
        chinese_words: count(conn, "SELECT COUNT(*) FROM chinese_words")?,
        chinese_definitions: count(conn, "SELECT COUNT(*) FROM chinese_definitions")?,
        examples: count(conn, "SELECT COUNT(*) FROM examples")?,
    })
}

/// Largest number of examples attached to a single word of `language`.
pub fn max_examples_per_word(conn: &Connection, language: Language) -> Result<u64, StoreError> {
    let n: Option<i64> = conn.query_row(
        "SELECT MAX(n) FROM (SELECT COUNT(*) AS n FROM examples WHERE language = ?1 GROUP BY word_id)",
        params![language.tag()],
        |row| row.get(0),
    )?;
    Ok(n.unwrap_or(0).max(0) as u64)
}

pub fn read_japanese_word(conn: &Connection, id: i64) -> Result<JapaneseWord, StoreError> {
    conn.query_row(
        "SELECT headword, reading, is_common, frequency_rank, jlpt_level, stroke_count
         FROM japanese_words WHERE id = ?1",
        params![id],
        |row| {
            let jlpt: Option<String> = row.get(4)?;
            Ok(JapaneseWord {
                headword: row.get(0)?,
                reading: row.get(1)?,
                is_common: row.get(2)?,
                frequency_rank: row.get(3)?,
                jlpt_level: jlpt.as_deref().and_then(JlptLevel::parse),
                stroke_count: row.get(5)?,
            })
        },
    )
    .optional()?
    .ok_or(StoreError::MissingWord {
        language: Language::Japanese,
        id,
    })
}

pub fn read_japanese_definitions(
    conn: &Connection,
    word_id: i64,
) -> Result<Vec<JapaneseDefinition>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT english_gloss, pos FROM japanese_definitions WHERE word_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![word_id], |row| {
        Ok(JapaneseDefinition {
            gloss: row.get(0)?,
            pos: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<_, _>>()?)
}

pub fn read_chinese_word(conn: &Connection, id: i64) -> Result<ChineseWord, StoreError> {
    conn.query_row(
        "SELECT simplified, traditional, pinyin, is_common, frequency_rank, hsk_level, stroke_count
         FROM chinese_words WHERE id = ?1",
        params![id],
        |row| {
            let hsk: Option<String> = row.get(5)?;
            Ok(ChineseWord {
                simplified: row.get(0)?,
                traditional: row.get(1)?,
                pinyin: row.get(2)?,
                is_common: row.get(3)?,
                frequency_rank: row.get(4)?,
                hsk_level: hsk.as_deref().and_then(HskLevel::parse),
                stroke_count: row.get(6)?,
            })
        },
    )
    .optional()?
    .ok_or(StoreError::MissingWord {
        language: Language::Chinese,
        id,
    })
}

pub fn read_chinese_definitions(conn: &Connection, word_id: i64) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT english_gloss FROM chinese_definitions WHERE word_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![word_id], |row| row.get(0))?;
    Ok(rows.collect::<Result<_, _>>()?)
}
