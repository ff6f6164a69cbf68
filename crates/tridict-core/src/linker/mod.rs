//! Sentence linker: attaches Tatoeba example sentences to stored words.
//!
//! For every Japanese (then Chinese) sentence with an English translation, each
//! common word whose surface form occurs in the sentence text gets an example
//! row, up to a per-word cap. Matching is plain substring containment, so a
//! single-character word also matches inside longer compounds.

mod corpus;

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::{debug, debug_span, info};

pub use corpus::{LanguageCodes, Sentence, SentenceCorpus, SentenceLang};

use crate::lexicon::Language;
use crate::settings::Settings;
use crate::source::SourceError;
use crate::store::{prune_orphan_examples, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkerConfig {
    pub max_examples_per_word: usize,
    /// Number of common words per language considered as match candidates.
    pub candidate_limit: usize,
    /// Log a progress line every this many scanned sentences.
    pub progress_interval: usize,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            max_examples_per_word: 5,
            candidate_limit: 5000,
            progress_interval: 10_000,
        }
    }
}

impl From<&Settings> for LinkerConfig {
    fn from(s: &Settings) -> Self {
        Self {
            max_examples_per_word: s.linker.max_examples_per_word,
            candidate_limit: s.linker.candidate_limit,
            progress_interval: s.progress.interval,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("sentence corpus: {0}")]
    Source(#[from] SourceError),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for LinkError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Store(StoreError::Sqlite(e))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LanguageReport {
    pub sentences_scanned: usize,
    pub sentences_translated: usize,
    pub examples_inserted: usize,
    pub words_with_examples: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub japanese: LanguageReport,
    pub chinese: LanguageReport,
    pub orphans_removed: usize,
}

impl LinkReport {
    pub fn examples_inserted(&self) -> usize {
        self.japanese.examples_inserted + self.chinese.examples_inserted
    }
}

/// A common word and the surface forms that count as a match.
#[derive(Debug)]
struct Candidate {
    id: i64,
    forms: Vec<String>,
}

impl Candidate {
    fn matches(&self, text: &str) -> bool {
        self.forms.iter().any(|form| text.contains(form.as_str()))
    }
}

/// Common words of `language`, longest first. Japanese words match on
/// headword or reading, Chinese words on the simplified form.
fn load_candidates(
    conn: &Connection,
    language: Language,
    limit: usize,
) -> Result<Vec<Candidate>, rusqlite::Error> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    match language {
        Language::Japanese => {
            let mut stmt = conn.prepare(
                "SELECT id, headword, reading FROM japanese_words
                 WHERE is_common = 1
                 ORDER BY LENGTH(headword) DESC, id
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                let headword: String = row.get(1)?;
                let reading: String = row.get(2)?;
                let mut forms = vec![headword];
                if reading != forms[0] {
                    forms.push(reading);
                }
                Ok(Candidate {
                    id: row.get(0)?,
                    forms,
                })
            })?;
            rows.collect()
        }
        Language::Chinese => {
            let mut stmt = conn.prepare(
                "SELECT id, simplified FROM chinese_words
                 WHERE is_common = 1
                 ORDER BY LENGTH(simplified) DESC, id
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(Candidate {
                    id: row.get(0)?,
                    forms: vec![row.get(1)?],
                })
            })?;
            rows.collect()
        }
    }
}

fn link_language(
    conn: &Connection,
    corpus: &SentenceCorpus,
    language: Language,
    config: &LinkerConfig,
) -> Result<LanguageReport, rusqlite::Error> {
    let _span = debug_span!("link_language", language = language.tag()).entered();

    let candidates = load_candidates(conn, language, config.candidate_limit)?;
    debug!("{} candidate words", candidates.len());

    let mut insert = conn.prepare_cached(
        "INSERT INTO examples (language, word_id, source_text, english_text)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let mut per_word: HashMap<i64, usize> = HashMap::new();
    let mut report = LanguageReport::default();
    let progress_interval = config.progress_interval.max(1);

    for sentence in corpus.sentences(language) {
        report.sentences_scanned += 1;
        if report.sentences_scanned % progress_interval == 0 {
            debug!(
                "scanned {} sentences, {} examples so far",
                report.sentences_scanned, report.examples_inserted
            );
        }
        let Some(english) = corpus.translation(sentence.id) else {
            continue;
        };
        report.sentences_translated += 1;

        for candidate in candidates.iter().filter(|c| c.matches(&sentence.text)) {
            let count = per_word.entry(candidate.id).or_default();
            if *count >= config.max_examples_per_word {
                continue;
            }
            insert.execute(params![language.tag(), candidate.id, sentence.text, english])?;
            *count += 1;
            report.examples_inserted += 1;
        }
    }

    report.words_with_examples = per_word.values().filter(|&&n| n > 0).count();
    Ok(report)
}

/// Replace every example row in the store with fresh links from `corpus`.
///
/// Runs in one transaction: existing examples are deleted, Japanese then
/// Chinese sentences are matched, orphaned rows are pruned, then a single
/// commit. Rerunning on the same inputs yields the same rows.
pub fn link_examples(
    conn: &mut Connection,
    corpus: &SentenceCorpus,
    config: &LinkerConfig,
) -> Result<LinkReport, LinkError> {
    let _span = debug_span!("link_examples").entered();
    let tx = conn.transaction()?;

    let cleared = tx.execute("DELETE FROM examples", [])?;
    debug!("cleared {cleared} existing examples");

    let japanese = link_language(&tx, corpus, Language::Japanese, config)?;
    let chinese = link_language(&tx, corpus, Language::Chinese, config)?;
    let orphans_removed = prune_orphan_examples(&tx)?;
    tx.commit()?;

    let report = LinkReport {
        japanese,
        chinese,
        orphans_removed,
    };
    info!(
        "linked {} examples ({} ja, {} zh)",
        report.examples_inserted(),
        japanese.examples_inserted,
        chinese.examples_inserted
    );
    Ok(report)
}

/// Load a corpus from `sentences` / `links` and link it into the store.
pub fn link_files(
    conn: &mut Connection,
    sentences: &Path,
    links: &Path,
    codes: &LanguageCodes,
    config: &LinkerConfig,
) -> Result<LinkReport, LinkError> {
    let corpus = SentenceCorpus::load(sentences, links, codes)?;
    link_examples(conn, &corpus, config)
}
