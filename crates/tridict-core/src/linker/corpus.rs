use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::lexicon::Language;
use crate::settings::LanguageSettings;
use crate::source::SourceError;
use crate::unicode::strip_bom;

/// Tatoeba language codes that select the sentences worth loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCodes {
    pub japanese: String,
    pub chinese: String,
    pub english: String,
}

impl Default for LanguageCodes {
    fn default() -> Self {
        Self {
            japanese: "jpn".to_string(),
            chinese: "cmn".to_string(),
            english: "eng".to_string(),
        }
    }
}

impl From<&LanguageSettings> for LanguageCodes {
    fn from(s: &LanguageSettings) -> Self {
        Self {
            japanese: s.japanese.clone(),
            chinese: s.chinese.clone(),
            english: s.english.clone(),
        }
    }
}

impl LanguageCodes {
    fn classify(&self, code: &str) -> Option<SentenceLang> {
        if code == self.japanese {
            Some(SentenceLang::Source(Language::Japanese))
        } else if code == self.chinese {
            Some(SentenceLang::Source(Language::Chinese))
        } else if code == self.english {
            Some(SentenceLang::English)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceLang {
    Source(Language),
    English,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub id: u64,
    pub lang: SentenceLang,
    pub text: String,
}

/// Japanese, Chinese and English Tatoeba sentences plus the translation links
/// between them.
///
/// Sentences keep file order. Only links from a Japanese or Chinese sentence to
/// an English one are retained, in file order, since nothing else is ever
/// followed.
#[derive(Debug, Default)]
pub struct SentenceCorpus {
    sentences: Vec<Sentence>,
    index: HashMap<u64, usize>,
    links: HashMap<u64, Vec<u64>>,
}

/// Iterate the lines of `reader`, dropping a leading BOM, trailing `\r`, blank
/// lines and lines that are not valid UTF-8.
fn for_each_line<R: BufRead>(
    reader: R,
    mut f: impl FnMut(&str),
) -> Result<u64, SourceError> {
    let mut skipped = 0u64;
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                skipped += 1;
                continue;
            }
            Err(e) => return Err(SourceError::Io(e)),
        };
        let line = strip_bom(&line).trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        f(line);
    }
    Ok(skipped)
}

/// `id \t lang \t text`. The text is everything after the second tab, kept
/// as written (it may be empty).
fn parse_sentence_row(line: &str) -> Option<(u64, &str, &str)> {
    let mut fields = line.splitn(3, '\t');
    let id = fields.next()?.trim().parse().ok()?;
    let lang = fields.next()?.trim();
    let text = fields.next()?;
    Some((id, lang, text))
}

/// `source_id \t target_id`.
fn parse_link_row(line: &str) -> Option<(u64, u64)> {
    let mut fields = line.split('\t');
    let source = fields.next()?.trim().parse().ok()?;
    let target = fields.next()?.trim().parse().ok()?;
    Some((source, target))
}

impl SentenceCorpus {
    pub fn load(sentences: &Path, links: &Path, codes: &LanguageCodes) -> Result<Self, SourceError> {
        info!(sentences = %sentences.display(), links = %links.display(), "reading sentence corpus");
        let sentences = BufReader::new(File::open(sentences)?);
        let links = BufReader::new(File::open(links)?);
        Self::from_readers(sentences, links, codes)
    }

    pub fn from_readers<S: BufRead, L: BufRead>(
        sentences: S,
        links: L,
        codes: &LanguageCodes,
    ) -> Result<Self, SourceError> {
        let mut corpus = Self::default();

        let mut malformed = 0u64;
        let invalid = for_each_line(sentences, |line| {
            let Some((id, code, text)) = parse_sentence_row(line) else {
                malformed += 1;
                return;
            };
            let Some(lang) = codes.classify(code) else {
                return;
            };
            // A repeated id keeps its first position but takes the later row.
            match corpus.index.get(&id) {
                Some(&i) => {
                    let sentence = &mut corpus.sentences[i];
                    sentence.lang = lang;
                    sentence.text = text.to_string();
                }
                None => {
                    corpus.index.insert(id, corpus.sentences.len());
                    corpus.sentences.push(Sentence {
                        id,
                        lang,
                        text: text.to_string(),
                    });
                }
            }
        })?;
        debug!("skipped {} malformed sentence rows", malformed + invalid);

        let mut kept = 0usize;
        let mut malformed = 0u64;
        let invalid = for_each_line(links, |line| {
            let Some((source, target)) = parse_link_row(line) else {
                malformed += 1;
                return;
            };
            let wanted = matches!(corpus.lang_of(source), Some(SentenceLang::Source(_)))
                && corpus.lang_of(target) == Some(SentenceLang::English);
            if wanted {
                corpus.links.entry(source).or_default().push(target);
                kept += 1;
            }
        })?;
        debug!("skipped {} malformed link rows", malformed + invalid);

        info!(
            "loaded {} sentences and {kept} translation links",
            corpus.sentences.len()
        );
        Ok(corpus)
    }

    fn lang_of(&self, id: u64) -> Option<SentenceLang> {
        self.index.get(&id).map(|&i| self.sentences[i].lang)
    }

    fn text_of(&self, id: u64) -> Option<&str> {
        self.index.get(&id).map(|&i| self.sentences[i].text.as_str())
    }

    /// Sentences of `language`, in file order.
    pub fn sentences(&self, language: Language) -> impl Iterator<Item = &Sentence> + '_ {
        self.sentences
            .iter()
            .filter(move |s| s.lang == SentenceLang::Source(language))
    }

    /// English text of the first linked English sentence. `None` when there is
    /// no such link or that sentence is empty; later links are not consulted.
    pub fn translation(&self, id: u64) -> Option<&str> {
        let &target = self.links.get(&id)?.first()?;
        self.text_of(target).filter(|text| !text.is_empty())
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
