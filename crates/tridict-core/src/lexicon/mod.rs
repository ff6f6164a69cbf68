//! Normalized lexicon records shared by the source parsers and the store.
//!
//! Parsers produce `JapaneseEntry` / `ChineseEntry` values (a word plus its
//! definitions); the store writes the word row first and keys the definition
//! rows to the id it returns.

mod entry;
mod level;

pub use entry::{
    ChineseEntry, ChineseWord, JapaneseDefinition, JapaneseEntry, JapaneseWord, KanjiInfo,
    KanjiMap,
};
pub use level::{HskLevel, JlptLevel, Language};
