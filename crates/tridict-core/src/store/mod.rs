//! SQLite destination store.
//!
//! `StoreWriter` owns the connection for a full rebuild: it recreates the file,
//! runs the schema script, appends word and definition rows in batched
//! transactions and finishes with `ANALYZE` + `VACUUM`. The read helpers are
//! used by the sentence linker, the `info` command and tests.

mod reader;
#[cfg(test)]
mod tests;
mod writer;

use std::io;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::lexicon::Language;

pub use reader::{
    count_rows, max_examples_per_word, read_chinese_definitions, read_chinese_word,
    read_japanese_definitions, read_japanese_word, RowCounts,
};
pub use writer::{StoreWriter, WriteStats};

/// Schema used when no external script is supplied.
pub const DEFAULT_SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no {language} word with id {id}")]
    MissingWord { language: Language, id: i64 },
}

/// Open an existing store for writing. Fails if `path` does not exist.
pub fn open(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

/// Open an existing store read-only.
pub fn open_read_only(path: &Path) -> Result<Connection, StoreError> {
    Ok(Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?)
}

/// Delete example rows whose `word_id` has no row in the matching word table.
///
/// `examples.word_id` cannot carry a foreign key (it points into one of two
/// tables), so this query is what keeps it consistent.
pub fn prune_orphan_examples(conn: &Connection) -> Result<usize, StoreError> {
    let removed = conn.execute(
        "DELETE FROM examples
         WHERE (language = 'ja' AND word_id NOT IN (SELECT id FROM japanese_words))
            OR (language = 'zh' AND word_id NOT IN (SELECT id FROM chinese_words))",
        [],
    )?;
    Ok(removed)
}
