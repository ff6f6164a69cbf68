use std::path::Path;
use std::process;

use tridict_core::linker::{link_files, LanguageCodes, LinkerConfig};
use tridict_core::store;

use super::{load_settings, print_link_report};

/// Rerun the sentence linker on an existing store.
pub fn examples(
    db: &Path,
    sentences: &Path,
    links: &Path,
    max_per_word: Option<usize>,
    config: Option<&Path>,
) {
    let settings = load_settings(config);

    let mut linker = LinkerConfig::from(settings);
    if let Some(n) = max_per_word {
        if n == 0 {
            eprintln!("Error: --max-per-word must be positive");
            process::exit(1);
        }
        linker.max_examples_per_word = n;
    }

    for path in [sentences, links] {
        if !path.is_file() {
            eprintln!("Error: {} not found", path.display());
            process::exit(1);
        }
    }

    let mut conn = die!(store::open(db), "Error opening {}: {}", db.display());
    let codes = LanguageCodes::from(&settings.languages);
    let report = die!(
        link_files(&mut conn, sentences, links, &codes, &linker),
        "Error linking examples: {}"
    );
    print_link_report(&report);
}
