//! Lanai - Main entrypoint.
//!
//! Loads configuration, initializes logging, and runs one of the subcommands:
//! bulk-loading a key/value file into a trie and querying it, validating the
//! configuration, or writing a default configuration file.

use clap::{Parser, Subcommand};
use lanai_lib::config::{self, ConfigLoader, LanaiConfig};
use lanai_lib::data_structures::ConcurrentTrie;
use lanai_lib::error::{
    report_error, set_error_reporter, ErrorContext, LanaiError, LanaiResult, TracingErrorReporter,
};
use lanai_lib::{loader, logging};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load a key/value file into a trie and print matching entries
    Load {
        /// Path to the key/value file
        #[clap(short, long, value_parser)]
        input: PathBuf,

        /// Only list entries whose key starts with this prefix
        #[clap(short, long)]
        prefix: Option<String>,

        /// List values instead of keys
        #[clap(long)]
        values: bool,

        /// Number of writer threads (overrides the configuration)
        #[clap(short, long)]
        threads: Option<usize>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// JSON report printed by the `load` subcommand.
#[derive(Serialize, Debug)]
struct LoadReport {
    size: usize,
    keys: usize,
    added: usize,
    prefix: Option<String>,
    entries: Vec<String>,
}

fn run_load(
    config: &LanaiConfig,
    input: PathBuf,
    prefix: Option<String>,
    values: bool,
    threads: Option<usize>,
) -> LanaiResult<()> {
    let file = File::open(&input)?;
    let pairs = loader::parse_pairs(BufReader::new(file), &config.loader)?;

    let trie = ConcurrentTrie::with_config(config.trie.clone());
    let threads = threads.unwrap_or(config.loader.writer_threads);
    let added = loader::load_parallel(&trie, &pairs, threads);

    let entries = match (&prefix, values) {
        (Some(p), false) => trie.get_prefix_keys(p),
        (Some(p), true) => trie.get_prefix_values(p),
        (None, false) => trie.get_all_keys(),
        (None, true) => trie.get_all_values(),
    };

    let mut entries: Vec<String> = entries
        .iter()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect();
    entries.sort();

    let report = LoadReport {
        size: trie.size(),
        keys: trie.len(),
        added,
        prefix,
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(args: Args) -> LanaiResult<()> {
    let config_loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);

    match args.command {
        Command::Load {
            input,
            prefix,
            values,
            threads,
        } => {
            let config = config_loader.load()?;
            logging::init(&config.log)?;
            set_error_reporter(Arc::new(TracingErrorReporter));
            config::init_global_config(config);

            let config = config::get_global_config();
            info!(input = ?input, "Loading key/value file");
            run_load(config.get(), input, prefix, values, threads)
        }
        Command::Validate => {
            config_loader.load()?;
            println!("Configuration is valid");
            Ok(())
        }
        Command::GenConfig { output } => {
            let default_config = LanaiConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            println!("Default configuration written to {}", output.display());
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        report_error(ErrorContext::new(e, "cli"));
        process::exit(1);
    }
}
