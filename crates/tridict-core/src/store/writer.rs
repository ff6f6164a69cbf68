use std::fs;
use std::io;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::StoreError;
use crate::lexicon::{ChineseEntry, ChineseWord, JapaneseDefinition, JapaneseEntry, JapaneseWord, Language};

/// Rows written by a [`StoreWriter`], plus the number of commits issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub japanese_words: usize,
    pub japanese_definitions: usize,
    pub chinese_words: usize,
    pub chinese_definitions: usize,
    /// Example rows inserted through [`StoreWriter::insert_example`]. Rows the
    /// sentence linker writes through [`StoreWriter::connection_mut`] are not
    /// counted here.
    pub examples: usize,
    pub commits: usize,
}

/// Append-only writer over a freshly created store.
///
/// A transaction is opened on the first insert and committed every
/// `batch_size` rows, so at most one batch is uncommitted at any time. Dropping
/// the writer without [`finalize`](Self::finalize) rolls back that batch when
/// the connection closes.
pub struct StoreWriter {
    conn: Connection,
    batch_size: usize,
    pending: usize,
    in_tx: bool,
    stats: WriteStats,
}

fn remove_if_exists(path: &Path) -> Result<bool, io::Error> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

impl StoreWriter {
    /// Delete any store at `path`, create a new one and run `schema` on it.
    pub fn create(path: &Path, schema: &str, batch_size: usize) -> Result<Self, StoreError> {
        if remove_if_exists(path)? {
            info!("removed existing store {}", path.display());
        }
        for suffix in ["-journal", "-wal", "-shm"] {
            let mut sidecar = path.as_os_str().to_owned();
            sidecar.push(suffix);
            remove_if_exists(Path::new(&sidecar))?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(schema)?;
        debug!("schema created at {}", path.display());

        Ok(Self {
            conn,
            batch_size: batch_size.max(1),
            pending: 0,
            in_tx: false,
            stats: WriteStats::default(),
        })
    }

    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    fn begin_if_needed(&mut self) -> Result<(), StoreError> {
        if !self.in_tx {
            self.conn.execute_batch("BEGIN")?;
            self.in_tx = true;
        }
        Ok(())
    }

    fn row_written(&mut self) -> Result<(), StoreError> {
        self.pending += 1;
        if self.pending >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Commit the open batch, if any.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if self.in_tx {
            self.conn.execute_batch("COMMIT")?;
            self.in_tx = false;
            self.stats.commits += 1;
            debug!("committed batch of {} rows", self.pending);
        }
        self.pending = 0;
        Ok(())
    }

    /// Flush and hand out the connection, e.g. to the sentence linker.
    pub fn connection_mut(&mut self) -> Result<&mut Connection, StoreError> {
        self.flush()?;
        Ok(&mut self.conn)
    }

    pub fn insert_japanese_word(&mut self, word: &JapaneseWord) -> Result<i64, StoreError> {
        self.begin_if_needed()?;
        self.conn
            .prepare_cached(
                "INSERT INTO japanese_words
                 (headword, reading, is_common, frequency_rank, jlpt_level, stroke_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?
            .execute(params![
                word.headword,
                word.reading,
                word.is_common,
                word.frequency_rank,
                word.jlpt_level.map(|l| l.as_str()),
                word.stroke_count,
            ])?;
        let id = self.conn.last_insert_rowid();
        self.stats.japanese_words += 1;
        self.row_written()?;
        Ok(id)
    }

    pub fn insert_japanese_definition(
        &mut self,
        word_id: i64,
        definition: &JapaneseDefinition,
    ) -> Result<(), StoreError> {
        self.begin_if_needed()?;
        self.conn
            .prepare_cached(
                "INSERT INTO japanese_definitions (word_id, english_gloss, pos)
                 VALUES (?1, ?2, ?3)",
            )?
            .execute(params![word_id, definition.gloss, definition.pos])?;
        self.stats.japanese_definitions += 1;
        self.row_written()
    }

    pub fn insert_chinese_word(&mut self, word: &ChineseWord) -> Result<i64, StoreError> {
        self.begin_if_needed()?;
        self.conn
            .prepare_cached(
                "INSERT INTO chinese_words
                 (simplified, traditional, pinyin, is_common, frequency_rank, hsk_level, stroke_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?
            .execute(params![
                word.simplified,
                word.traditional,
                word.pinyin,
                word.is_common,
                word.frequency_rank,
                word.hsk_level.map(|l| l.as_str()),
                word.stroke_count,
            ])?;
        let id = self.conn.last_insert_rowid();
        self.stats.chinese_words += 1;
        self.row_written()?;
        Ok(id)
    }

    pub fn insert_chinese_definition(&mut self, word_id: i64, gloss: &str) -> Result<(), StoreError> {
        self.begin_if_needed()?;
        self.conn
            .prepare_cached("INSERT INTO chinese_definitions (word_id, english_gloss) VALUES (?1, ?2)")?
            .execute(params![word_id, gloss])?;
        self.stats.chinese_definitions += 1;
        self.row_written()
    }

    pub fn insert_example(
        &mut self,
        language: Language,
        word_id: i64,
        source_text: &str,
        english_text: &str,
    ) -> Result<(), StoreError> {
        self.begin_if_needed()?;
        self.conn
            .prepare_cached(
                "INSERT INTO examples (language, word_id, source_text, english_text)
                 VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(params![language.tag(), word_id, source_text, english_text])?;
        self.stats.examples += 1;
        self.row_written()
    }

    /// Insert a word and all of its definitions. Returns the word id.
    pub fn write_japanese_entry(&mut self, entry: &JapaneseEntry) -> Result<i64, StoreError> {
        let id = self.insert_japanese_word(&entry.word)?;
        for definition in &entry.definitions {
            self.insert_japanese_definition(id, definition)?;
        }
        Ok(id)
    }

    /// Insert a word and all of its definitions. Returns the word id.
    pub fn write_chinese_entry(&mut self, entry: &ChineseEntry) -> Result<i64, StoreError> {
        let id = self.insert_chinese_word(&entry.word)?;
        for gloss in &entry.definitions {
            self.insert_chinese_definition(id, gloss)?;
        }
        Ok(id)
    }

    /// Final commit, then `ANALYZE` and `VACUUM`. `VACUUM` cannot run inside a
    /// transaction, so the flush must come first.
    pub fn finalize(mut self) -> Result<WriteStats, StoreError> {
        self.flush()?;
        info!("refreshing statistics and compacting store");
        self.conn.execute_batch("ANALYZE;")?;
        self.conn.execute_batch("VACUUM;")?;
        Ok(self.stats)
    }
}
