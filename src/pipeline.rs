//! Full rebuild: sources → staging store → sentence linker → rename.
//!
//! Every build writes `<output>.tmp` from scratch and renames it over the
//! destination only after the last stage succeeds. A failed build leaves the
//! staging file behind and the previous store untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use tridict_core::lexicon::KanjiMap;
use tridict_core::linker::{link_examples, LanguageCodes, LinkError, LinkReport, LinkerConfig, SentenceCorpus};
use tridict_core::sample::write_sample;
use tridict_core::settings::Settings;
use tridict_core::source::{CedictSource, DictSource, JmdictSource, KanjidicSource, SourceError};
use tridict_core::store::{StoreError, StoreWriter, WriteStats, DEFAULT_SCHEMA};

pub const JMDICT_FILE_NAMES: &[&str] = &["JMdict_e.xml", "JMdict_e", "JMdict.xml"];
pub const CEDICT_FILE_NAMES: &[&str] = &["cedict_ts.u8", "cedict_1_0_ts_utf-8_mdbg.txt"];
pub const KANJIDIC_FILE_NAMES: &[&str] = &["kanjidic2.xml"];
pub const SENTENCES_FILE_NAME: &str = "sentences.csv";
pub const LINKS_FILE_NAME: &str = "links.csv";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no dictionary sources found: need JMdict and/or CC-CEDICT")]
    NoSources,

    #[error("source: {0}")]
    Source(#[from] SourceError),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("linker: {0}")]
    Link(#[from] LinkError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Locations of the raw corpora. `None` means the file was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePaths {
    pub jmdict: Option<PathBuf>,
    pub cedict: Option<PathBuf>,
    pub kanjidic: Option<PathBuf>,
    pub sentences: Option<PathBuf>,
    pub links: Option<PathBuf>,
}

fn first_existing(dirs: &[PathBuf], names: &[&str]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

impl SourcePaths {
    /// Look up the well-known file names inside `input`. Tatoeba files are
    /// searched in `input/tatoeba/` first, then in `input/`.
    pub fn discover(input: &Path) -> Self {
        let here = [input.to_path_buf()];
        let tatoeba = [input.join("tatoeba"), input.to_path_buf()];
        Self {
            jmdict: first_existing(&here, JMDICT_FILE_NAMES),
            cedict: first_existing(&here, CEDICT_FILE_NAMES),
            kanjidic: first_existing(&here, KANJIDIC_FILE_NAMES),
            sentences: first_existing(&tatoeba, &[SENTENCES_FILE_NAME]),
            links: first_existing(&tatoeba, &[LINKS_FILE_NAME]),
        }
    }

    fn has_dictionary(&self) -> bool {
        self.jmdict.is_some() || self.cedict.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output: PathBuf,
    /// Schema script run on the fresh store.
    pub schema: String,
    /// Write the built-in sample set instead of parsing sources.
    pub sample: bool,
    pub link_examples: bool,
    pub batch_size: usize,
    pub progress_interval: usize,
    pub linker: LinkerConfig,
    pub codes: LanguageCodes,
}

impl BuildOptions {
    pub fn new(output: PathBuf, settings: &Settings) -> Self {
        Self {
            output,
            schema: DEFAULT_SCHEMA.to_string(),
            sample: false,
            link_examples: true,
            batch_size: settings.store.batch_size,
            progress_interval: settings.progress.interval,
            linker: LinkerConfig::from(settings),
            codes: LanguageCodes::from(&settings.languages),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Rows written by the store writer. Linked examples are in `links`.
    pub written: WriteStats,
    /// `None` when linking was disabled or the corpus was missing.
    pub links: Option<LinkReport>,
}

impl BuildReport {
    /// Example rows in the finished store: sample examples plus linked ones.
    pub fn examples(&self) -> usize {
        self.written.examples + self.links.map_or(0, |l| l.examples_inserted())
    }
}

/// `dict.sqlite` → `dict.sqlite.tmp`.
pub fn staging_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Rebuild the store at `options.output`.
pub fn build(sources: &SourcePaths, options: &BuildOptions) -> Result<BuildReport, PipelineError> {
    let _span = info_span!("build").entered();

    if !options.sample && !sources.has_dictionary() {
        return Err(PipelineError::NoSources);
    }

    if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let staging = staging_path(&options.output);
    let mut writer = StoreWriter::create(&staging, &options.schema, options.batch_size)?;

    let links = if options.sample {
        info!("writing built-in sample data");
        write_sample(&mut writer)?;
        None
    } else {
        ingest_dictionaries(&mut writer, sources, options)?;
        if options.link_examples {
            link_corpus(&mut writer, sources, options)?
        } else {
            None
        }
    };

    let written = writer.finalize()?;
    fs::rename(&staging, &options.output)?;
    info!(
        "store written to {} ({} ja words, {} zh words)",
        options.output.display(),
        written.japanese_words,
        written.chinese_words
    );
    Ok(BuildReport { written, links })
}

fn ingest_dictionaries(
    writer: &mut StoreWriter,
    sources: &SourcePaths,
    options: &BuildOptions,
) -> Result<(), PipelineError> {
    let kanji = match &sources.kanjidic {
        Some(path) => KanjidicSource.load_optional(path)?,
        None => {
            warn!("KANJIDIC2 not found, stroke counts will be empty");
            KanjiMap::new()
        }
    };

    match &sources.jmdict {
        Some(path) => {
            let entries = JmdictSource::new(&kanji)
                .with_progress_interval(options.progress_interval)
                .parse_file(path)?;
            for entry in &entries {
                writer.write_japanese_entry(entry)?;
            }
        }
        None => warn!("JMdict not found, no Japanese entries will be written"),
    }

    match &sources.cedict {
        Some(path) => {
            for entry in &CedictSource.parse_file(path)? {
                writer.write_chinese_entry(entry)?;
            }
        }
        None => warn!("CC-CEDICT not found, no Chinese entries will be written"),
    }

    Ok(())
}

fn link_corpus(
    writer: &mut StoreWriter,
    sources: &SourcePaths,
    options: &BuildOptions,
) -> Result<Option<LinkReport>, PipelineError> {
    let (Some(sentences), Some(links)) = (&sources.sentences, &sources.links) else {
        warn!("Tatoeba sentences/links not found, skipping example linking");
        return Ok(None);
    };
    let corpus = SentenceCorpus::load(sentences, links, &options.codes)?;
    let report = link_examples(writer.connection_mut()?, &corpus, &options.linker)?;
    Ok(Some(report))
}

#[cfg(test)]
mod tests;
