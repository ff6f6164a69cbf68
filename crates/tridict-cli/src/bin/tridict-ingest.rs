use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tridict::trace_init::init_tracing;
use tridict_cli::commands::build_ops::{self, BuildArgs};
use tridict_cli::commands::{config_ops, example_ops, info_ops};

#[derive(Parser)]
#[command(
    name = "tridict-ingest",
    about = "Build the Japanese/Chinese/English dictionary store"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the store from the source corpora
    Build {
        /// Directory holding JMdict, CC-CEDICT, KANJIDIC2 and Tatoeba files
        #[arg(long, required_unless_present = "sample")]
        input: Option<PathBuf>,
        /// Destination SQLite file
        #[arg(long)]
        output: PathBuf,
        /// Write the built-in sample data instead of parsing sources
        #[arg(long)]
        sample: bool,
        /// SQL schema script (default: built-in)
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Settings TOML file (default: built-in)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip sentence linking
        #[arg(long)]
        no_examples: bool,
        /// JMdict XML file (overrides discovery)
        #[arg(long)]
        jmdict: Option<PathBuf>,
        /// CC-CEDICT text file (overrides discovery)
        #[arg(long)]
        cedict: Option<PathBuf>,
        /// KANJIDIC2 XML file (overrides discovery)
        #[arg(long)]
        kanjidic: Option<PathBuf>,
        /// Tatoeba sentences.csv (overrides discovery)
        #[arg(long)]
        sentences: Option<PathBuf>,
        /// Tatoeba links.csv (overrides discovery)
        #[arg(long)]
        links: Option<PathBuf>,
    },
    /// Relink example sentences in an existing store
    Examples {
        /// Store to update in place
        #[arg(long)]
        db: PathBuf,
        /// Tatoeba sentences.csv
        #[arg(long)]
        sentences: PathBuf,
        /// Tatoeba links.csv
        #[arg(long)]
        links: PathBuf,
        /// Examples kept per word (default: from settings)
        #[arg(long)]
        max_per_word: Option<usize>,
        /// Settings TOML file (default: built-in)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show table row counts of a store
    Info {
        /// Store file
        file: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build {
            input,
            output,
            sample,
            schema,
            config,
            no_examples,
            jmdict,
            cedict,
            kanjidic,
            sentences,
            links,
        } => build_ops::build(&BuildArgs {
            input,
            output,
            sample,
            schema,
            config,
            no_examples,
            jmdict,
            cedict,
            kanjidic,
            sentences,
            links,
        }),
        Command::Examples {
            db,
            sentences,
            links,
            max_per_word,
            config,
        } => example_ops::examples(&db, &sentences, &links, max_per_word, config.as_deref()),
        Command::Info { file, json } => info_ops::info(&file, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
