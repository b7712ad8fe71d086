//! citegen CLI - Main entry point

use anyhow::Result;
use citegen::{Dialect, Encoding};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "citegen")]
#[command(version)]
#[command(about = "Citation record normalization and style inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize records into CSL-JSON style-processor input
    Normalize {
        /// JSON or YAML file holding an array of records
        file: PathBuf,

        /// Field dialect (legacy, bibtex, extended, biblatex)
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Target encoding (rich, html, plain, text)
        #[arg(short, long)]
        encoding: Option<Encoding>,

        /// YAML file with default options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print citation style metadata as JSON
    StyleInfo {
        /// Style definition files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so that stdout carries only command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citegen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            file,
            dialect,
            encoding,
            config,
        } => commands::normalize::execute(&file, dialect, encoding, config.as_deref()),
        Commands::StyleInfo { files } => commands::style_info::execute(&files),
    }
}
