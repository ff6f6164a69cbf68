use std::fs;
use std::process;

pub fn settings_export() {
    print!("{}", tridict_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        tridict_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: store.batch_size={}, linker.max_examples_per_word={}, linker.candidate_limit={}, languages={}/{}/{}",
        s.store.batch_size,
        s.linker.max_examples_per_word,
        s.linker.candidate_limit,
        s.languages.japanese,
        s.languages.chinese,
        s.languages.english
    );
}
