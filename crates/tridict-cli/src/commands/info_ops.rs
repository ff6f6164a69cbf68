use std::fs;
use std::path::Path;
use std::process;

use serde::Serialize;
use tridict_core::lexicon::Language;
use tridict_core::store::{self, RowCounts, StoreError};

#[derive(Debug, Serialize)]
pub struct StoreInfo {
    pub path: String,
    pub size_bytes: u64,
    pub counts: RowCounts,
    pub max_examples_per_word_ja: u64,
    pub max_examples_per_word_zh: u64,
}

pub fn collect_info(path: &Path) -> Result<StoreInfo, StoreError> {
    let conn = store::open_read_only(path)?;
    Ok(StoreInfo {
        path: path.display().to_string(),
        size_bytes: fs::metadata(path)?.len(),
        counts: store::count_rows(&conn)?,
        max_examples_per_word_ja: store::max_examples_per_word(&conn, Language::Japanese)?,
        max_examples_per_word_zh: store::max_examples_per_word(&conn, Language::Chinese)?,
    })
}

pub fn info(file: &str, json: bool) {
    let path = Path::new(file);
    if !path.is_file() {
        eprintln!("Error: {file} not found");
        process::exit(1);
    }
    let info = die!(collect_info(path), "Error reading {file}: {}");

    if json {
        let out = die!(serde_json::to_string_pretty(&info), "Error: {}");
        println!("{out}");
        return;
    }

    let c = &info.counts;
    println!("Store: {file} ({:.1} MB)", info.size_bytes as f64 / 1_048_576.0);
    println!("  japanese_words:       {}", c.japanese_words);
    println!("  japanese_definitions: {}", c.japanese_definitions);
    println!("  chinese_words:        {}", c.chinese_words);
    println!("  chinese_definitions:  {}", c.chinese_definitions);
    println!("  examples:             {}", c.examples);
    println!(
        "  max examples/word:    ja {}, zh {}",
        info.max_examples_per_word_ja, info.max_examples_per_word_zh
    );
}
