//! Auryl CLI - Command-line interface for the Auryl component language.

use auryl_driver::BuildConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Auryl - describe components, their ports and what triggers them
#[derive(Parser)]
#[command(name = "auryl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Name of the component tree's root (default: $AURYL_ROOT_NAME or `Root`)
    #[arg(long, global = true)]
    root_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
    },

    /// Parse a file and show the raw syntax tree
    Parse {
        /// Input file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build files into one component tree and report errors
    Check {
        /// Input file(s), in build order
        files: Vec<PathBuf>,
    },

    /// Build files and print the component tree
    Tree {
        /// Input file(s), in build order
        files: Vec<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let mut config = BuildConfig::from_env();
    if cli.verbose {
        config = config.with_verbose(true);
    }
    if let Some(root_name) = cli.root_name {
        config = config.with_root_name(root_name);
    }

    // Set up logging
    let filter = if config.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Lex { file } => commands::lex::run(&file),
        Commands::Parse { file, json } => commands::parse::run(&file, json),
        Commands::Check { files } => commands::check::run(&files, &config),
        Commands::Tree { files } => commands::tree::run(&files, &config),
    }
}
