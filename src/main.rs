#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser;
use log::error;
use phoninv::writer::{write_unknown_report, CsvTableWriter, TableWriter};
use phoninv::{MissingLanguagePolicy, PhonInvResult, PipelineInputs, PipelineSettings};
use std::path::PathBuf;

/// Convert a JSON dump of phonological inventories into language, parameter
/// and value tables.
#[derive(Parser)]
#[command(name = "phoninv", version)]
struct Cli {
    /// JSON object mapping inventory labels to consonant, vowel and tone lists.
    #[arg(long)]
    raw: PathBuf,

    /// Source citations, one per inventory, after a header line.
    #[arg(long)]
    sources: PathBuf,

    /// Language mapping with `name` and `glottocode` columns.
    #[arg(long)]
    languages: PathBuf,

    /// Glottolog languoid table used to fill in language metadata.
    #[arg(long)]
    glottolog: Option<PathBuf>,

    /// `grapheme,symbol,description` table replacing the built-in sound catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured handling of unmapped languages.
    #[arg(long, value_enum)]
    missing_language: Option<MissingLanguagePolicy>,

    /// Write unresolved graphemes to this CSV file.
    #[arg(long)]
    unknown_report: Option<PathBuf>,

    /// Output directory for the tables.
    #[arg(long, default_value = "cldf")]
    output: PathBuf,

    /// Log every segment resolution.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> PhonInvResult<()> {
    let mut settings = PipelineSettings::load(cli.config.as_deref())?;
    if let Some(policy) = cli.missing_language {
        settings.missing_language = policy;
    }
    let inputs = PipelineInputs {
        raw: cli.raw,
        sources: cli.sources,
        languages: cli.languages,
        glottolog: cli.glottolog,
        catalog: cli.catalog,
    };

    let dataset = phoninv::run(&inputs, &settings)?;
    if let Some(path) = &cli.unknown_report {
        write_unknown_report(path, &dataset.unknowns)?;
    }
    CsvTableWriter::new(cli.output).write(&dataset)
}
