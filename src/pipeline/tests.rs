use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tridict_core::lexicon::JlptLevel;
use tridict_core::sample::word_pair_count;
use tridict_core::settings::parse_settings_toml;
use tridict_core::settings::DEFAULT_SETTINGS_TOML;
use tridict_core::store::{count_rows, open_read_only, read_japanese_definitions, read_japanese_word};

use super::*;

const JMDICT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
<!ELEMENT JMdict (entry*)>
<!ENTITY n "noun (common) (futsuumeishi)">
]>
<JMdict>
<entry>
<k_ele><keb>猫</keb><ke_pri>ichi1</ke_pri></k_ele>
<r_ele><reb>ねこ</reb><re_pri>ichi1</re_pri></r_ele>
<sense><pos>&n;</pos><gloss>cat</gloss><gloss>feline</gloss></sense>
</entry>
<entry>
<r_ele><reb>すし</reb></r_ele>
<sense><gloss>sushi</gloss></sense>
</entry>
</JMdict>
"#;

const KANJIDIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kanjidic2>
<character><literal>猫</literal><misc><grade>9</grade><stroke_count>11</stroke_count></misc></character>
</kanjidic2>
"#;

const CEDICT: &str = "# CC-CEDICT\n貓 猫 [mao1] /cat/feline/\n狗 狗 [gou3] /dog/\n";
const SENTENCES: &str = "1\tjpn\t猫が好きです。\n2\tcmn\t我喜欢猫。\n3\teng\tI like cats.\n";
const LINKS: &str = "1\t3\n2\t3\n";

fn input_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("JMdict_e.xml"), JMDICT).unwrap();
    fs::write(dir.path().join("kanjidic2.xml"), KANJIDIC).unwrap();
    fs::write(dir.path().join("cedict_ts.u8"), CEDICT).unwrap();
    fs::create_dir(dir.path().join("tatoeba")).unwrap();
    fs::write(dir.path().join("tatoeba/sentences.csv"), SENTENCES).unwrap();
    fs::write(dir.path().join("tatoeba/links.csv"), LINKS).unwrap();
    dir
}

fn options(output: &Path) -> BuildOptions {
    let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
    BuildOptions::new(output.to_path_buf(), &settings)
}

#[test]
fn test_discover() {
    let input = input_dir();
    let paths = SourcePaths::discover(input.path());
    assert_eq!(paths.jmdict, Some(input.path().join("JMdict_e.xml")));
    assert_eq!(paths.cedict, Some(input.path().join("cedict_ts.u8")));
    assert_eq!(paths.kanjidic, Some(input.path().join("kanjidic2.xml")));
    assert_eq!(paths.sentences, Some(input.path().join("tatoeba/sentences.csv")));
    assert_eq!(paths.links, Some(input.path().join("tatoeba/links.csv")));
}

#[test]
fn test_discover_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("JMdict.xml"), JMDICT).unwrap();
    fs::write(dir.path().join("cedict_1_0_ts_utf-8_mdbg.txt"), CEDICT).unwrap();
    fs::write(dir.path().join("sentences.csv"), SENTENCES).unwrap();

    let paths = SourcePaths::discover(dir.path());
    assert_eq!(paths.jmdict, Some(dir.path().join("JMdict.xml")));
    assert_eq!(paths.cedict, Some(dir.path().join("cedict_1_0_ts_utf-8_mdbg.txt")));
    assert_eq!(paths.kanjidic, None);
    assert_eq!(paths.sentences, Some(dir.path().join("sentences.csv")));
    assert_eq!(paths.links, None);
}

#[test]
fn test_staging_path() {
    assert_eq!(
        staging_path(Path::new("out/dict.sqlite")),
        Path::new("out/dict.sqlite.tmp")
    );
}

#[test]
fn test_full_build() {
    let input = input_dir();
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("nested/dict.sqlite");

    let report = build(&SourcePaths::discover(input.path()), &options(&output)).unwrap();
    assert_eq!(report.written.japanese_words, 2);
    assert_eq!(report.written.chinese_words, 2);
    let links = report.links.unwrap();
    assert_eq!(links.japanese.examples_inserted, 1);
    assert_eq!(links.chinese.examples_inserted, 1);
    assert_eq!(report.written.examples, 0);
    assert_eq!(report.examples(), 2);

    assert!(output.exists());
    assert!(!staging_path(&output).exists());

    let conn = open_read_only(&output).unwrap();
    let counts = count_rows(&conn).unwrap();
    assert_eq!(counts.japanese_definitions, 2);
    assert_eq!(counts.chinese_definitions, 3);
    assert_eq!(counts.examples, 2);

    let neko = read_japanese_word(&conn, 1).unwrap();
    assert_eq!(neko.headword, "猫");
    assert_eq!(neko.frequency_rank, Some(150));
    assert_eq!(neko.stroke_count, Some(11));
    assert_eq!(neko.jlpt_level, None::<JlptLevel>);
    let defs = read_japanese_definitions(&conn, 1).unwrap();
    assert_eq!(defs[0].gloss, "cat; feline");
    assert_eq!(defs[0].pos.as_deref(), Some("noun"));

    let sushi = read_japanese_word(&conn, 2).unwrap();
    assert_eq!(sushi.headword, "すし");
    assert!(!sushi.is_common);
}

#[test]
fn test_no_sources_aborts() {
    let input = tempfile::tempdir().unwrap();
    let output = input.path().join("dict.sqlite");
    let err = build(&SourcePaths::discover(input.path()), &options(&output)).unwrap_err();
    assert!(matches!(err, PipelineError::NoSources));
    assert!(!output.exists());
    assert!(!staging_path(&output).exists());
}

#[test]
fn test_single_language_build() {
    let input = tempfile::tempdir().unwrap();
    fs::write(input.path().join("cedict_ts.u8"), CEDICT).unwrap();
    let output = input.path().join("dict.sqlite");

    let report = build(&SourcePaths::discover(input.path()), &options(&output)).unwrap();
    assert_eq!(report.written.japanese_words, 0);
    assert_eq!(report.written.chinese_words, 2);
    assert!(report.links.is_none());
}

#[test]
fn test_without_linking() {
    let input = input_dir();
    let output = input.path().join("dict.sqlite");
    let mut opts = options(&output);
    opts.link_examples = false;

    let report = build(&SourcePaths::discover(input.path()), &opts).unwrap();
    assert!(report.links.is_none());
    let conn = open_read_only(&output).unwrap();
    assert_eq!(count_rows(&conn).unwrap().examples, 0);
}

#[test]
fn test_sample_build_ignores_sources() {
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("sample.sqlite");
    let mut opts = options(&output);
    opts.sample = true;

    let report = build(&SourcePaths::default(), &opts).unwrap();
    assert_eq!(report.written.japanese_words, word_pair_count());
    assert_eq!(report.written.chinese_words, 20);
    assert_eq!(report.written.examples, 10);
    assert_eq!(report.examples(), 10);
}

#[test]
fn test_failed_build_keeps_previous_store() {
    let input = input_dir();
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("dict.sqlite");
    build(&SourcePaths::discover(input.path()), &options(&output)).unwrap();

    fs::write(
        input.path().join("JMdict_e.xml"),
        "<JMdict><entry><keb>猫</reb></entry></JMdict>",
    )
    .unwrap();
    let err = build(&SourcePaths::discover(input.path()), &options(&output)).unwrap_err();
    assert!(matches!(err, PipelineError::Source(_)));

    assert!(staging_path(&output).exists());
    let conn = open_read_only(&output).unwrap();
    assert_eq!(count_rows(&conn).unwrap().japanese_words, 2);
}

#[test]
fn test_rebuild_is_repeatable() {
    let input = input_dir();
    let output = input.path().join("dict.sqlite");
    let sources = SourcePaths::discover(input.path());

    let first = build(&sources, &options(&output)).unwrap();
    let second = build(&sources, &options(&output)).unwrap();
    assert_eq!(first, second);
}
