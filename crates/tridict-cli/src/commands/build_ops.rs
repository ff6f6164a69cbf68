use std::fs;
use std::path::PathBuf;
use std::process;

use tridict::{build as run_build, BuildOptions, SourcePaths};
use tridict_core::sample::word_pair_count;

use super::{load_settings, print_link_report};

/// Arguments of the `build` subcommand.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub input: Option<PathBuf>,
    pub output: PathBuf,
    pub sample: bool,
    pub schema: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_examples: bool,
    pub jmdict: Option<PathBuf>,
    pub cedict: Option<PathBuf>,
    pub kanjidic: Option<PathBuf>,
    pub sentences: Option<PathBuf>,
    pub links: Option<PathBuf>,
}

/// Files found in the input directory, with explicit paths taking precedence.
pub fn resolve_sources(args: &BuildArgs) -> SourcePaths {
    let found = args
        .input
        .as_deref()
        .map(SourcePaths::discover)
        .unwrap_or_default();
    SourcePaths {
        jmdict: args.jmdict.clone().or(found.jmdict),
        cedict: args.cedict.clone().or(found.cedict),
        kanjidic: args.kanjidic.clone().or(found.kanjidic),
        sentences: args.sentences.clone().or(found.sentences),
        links: args.links.clone().or(found.links),
    }
}

pub fn build(args: &BuildArgs) {
    let settings = load_settings(args.config.as_deref());

    if !args.sample {
        match &args.input {
            Some(dir) if !dir.is_dir() => {
                eprintln!("Error: {} is not a directory", dir.display());
                process::exit(1);
            }
            _ => {}
        }
    }

    let mut options = BuildOptions::new(args.output.clone(), settings);
    options.sample = args.sample;
    options.link_examples = !args.no_examples;
    if let Some(schema) = &args.schema {
        options.schema = die!(
            fs::read_to_string(schema),
            "Error reading schema {}: {}",
            schema.display()
        );
    }

    let sources = resolve_sources(args);
    if !args.sample {
        for (label, path) in [
            ("JMdict", &sources.jmdict),
            ("CC-CEDICT", &sources.cedict),
            ("KANJIDIC2", &sources.kanjidic),
            ("sentences", &sources.sentences),
            ("links", &sources.links),
        ] {
            match path {
                Some(p) => eprintln!("{label}: {}", p.display()),
                None => eprintln!("{label}: (not found)"),
            }
        }
    }

    let report = die!(run_build(&sources, &options), "Error building store: {}");

    let w = &report.written;
    eprintln!(
        "Wrote {}: {} ja words ({} definitions), {} zh words ({} definitions)",
        args.output.display(),
        w.japanese_words,
        w.japanese_definitions,
        w.chinese_words,
        w.chinese_definitions
    );
    match &report.links {
        Some(links) => print_link_report(links),
        None if args.sample => eprintln!(
            "Sample data: {} word pairs, {} examples",
            word_pair_count(),
            report.examples()
        ),
        None => eprintln!("No examples linked"),
    }
}
