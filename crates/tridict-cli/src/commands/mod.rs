use std::fs;
use std::path::Path;
use std::process;

use tridict_core::linker::{LanguageReport, LinkReport};
use tridict_core::settings::{self, Settings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub mod build_ops;
pub mod config_ops;
pub mod example_ops;
pub mod info_ops;

/// Install the settings from `config` (if given) and return the active ones.
fn load_settings(config: Option<&Path>) -> &'static Settings {
    if let Some(path) = config {
        let content = die!(
            fs::read_to_string(path),
            "Error reading {}: {}",
            path.display()
        );
        die!(settings::init_custom(content), "Error in settings: {}");
    }
    settings::settings()
}

fn print_language_report(tag: &str, r: &LanguageReport) {
    eprintln!(
        "  {tag}: {} sentences, {} translated, {} examples for {} words",
        r.sentences_scanned, r.sentences_translated, r.examples_inserted, r.words_with_examples
    );
}

fn print_link_report(report: &LinkReport) {
    eprintln!("Linked {} examples", report.examples_inserted());
    print_language_report("ja", &report.japanese);
    print_language_report("zh", &report.chinese);
    if report.orphans_removed > 0 {
        eprintln!("  removed {} orphaned examples", report.orphans_removed);
    }
}
