use std::path::PathBuf;

use clap::Parser;
use histones::{
    cache::{CacheOptions, DEFAULT_MODE},
    commands::{histones_inspect, DatasetSource},
    prelude::{DatasetOptions, HistoneError},
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const INFO: &str = "\
histones: build per-gene histone mark datasets for model training
usage: histones [--help] <archive>

Loads an .npz archive of [genes, bins, 7] arrays keyed by cell type, builds
the dataset, and prints a structural summary.

  --sequences joins each gene's one-hot encoded DNA sequence to its features.
  --cache-read/--cache-write read or write the derived arrays as .npy files.
";

#[derive(Parser)]
#[clap(name = "histones")]
#[clap(about = INFO)]
struct Cli {
    /// increase log verbosity (-d info, -dd debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// an .npz histone archive with one array per cell type
    #[arg(required = true)]
    archive: PathBuf,

    /// a comma-delimited `id,sequence` table (possibly gzipped) to join
    #[arg(long, conflicts_with_all = ["cache_read", "cache_write"])]
    sequences: Option<PathBuf>,

    /// read the derived arrays from this cache directory, skipping the archive
    #[arg(long)]
    cache_read: Option<PathBuf>,

    /// write the derived arrays to this cache directory
    #[arg(long)]
    cache_write: Option<PathBuf>,

    /// the cache subdirectory, e.g. train, valid, or test
    #[arg(long, default_value = DEFAULT_MODE)]
    mode: String,

    /// only load these cell types, in this order
    #[arg(long, value_delimiter = ',', conflicts_with = "cache_read")]
    cell_types: Option<Vec<String>>,

    /// check that gene ids and expression values are constant across bins
    #[arg(long, conflicts_with = "cache_read")]
    validate: bool,
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    // only fails if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run() -> Result<(), HistoneError> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let source = match cli.sequences {
        Some(sequence_table) => DatasetSource::Sequences(sequence_table),
        None => DatasetSource::Cached(CacheOptions {
            read: cli.cache_read,
            write: cli.cache_write,
            mode: cli.mode,
        }),
    };
    let options = DatasetOptions {
        cell_types: cli.cell_types,
        validate: cli.validate,
        ..Default::default()
    };

    let output = histones_inspect(&cli.archive, source, &options)?;
    println!("{}", output.value());
    for issue in output.report().issues() {
        eprintln!("warning: {}", issue);
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
