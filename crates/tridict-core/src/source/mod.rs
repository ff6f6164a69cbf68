//! Source-format parsers.
//!
//! Each parser turns one raw corpus into normalized lexicon records:
//! - [`JmdictSource`]: JMdict XML → `Vec<JapaneseEntry>`
//! - [`CedictSource`]: CC-CEDICT text → `Vec<ChineseEntry>`
//! - [`KanjidicSource`]: KANJIDIC2 XML → `KanjiMap`
//!
//! Malformed entries and lines are skipped; only I/O and XML syntax errors
//! abort a parse.

mod cedict;
mod jmdict;
mod kanjidic;
#[cfg(test)]
mod tests;
mod xml;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::info;

pub use cedict::CedictSource;
pub use jmdict::JmdictSource;
pub use kanjidic::KanjidicSource;

/// A dictionary source that parses one raw corpus.
pub trait DictSource {
    type Output;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Parse a whole corpus from `reader`.
    fn parse<R: BufRead>(&self, reader: R) -> Result<Self::Output, SourceError>;

    /// Open `path` and parse it.
    fn parse_file(&self, path: &Path) -> Result<Self::Output, SourceError> {
        info!(source = self.name(), path = %path.display(), "reading source");
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("XML error: {0}")]
    Xml(String),
}
