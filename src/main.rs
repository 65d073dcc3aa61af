//! `pagegrid` CLI - Rebuild tables or plain text from a JSON page bundle

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pagegrid::{compile_document, compile_tables, render, ExtractOptions, PageBundle, Thresholds};

#[derive(Parser)]
#[command(name = "pagegrid")]
#[command(about = "Rebuild tables and reading-order text from positioned page text")]
#[command(version)]
struct Cli {
    /// Threshold overrides (TOML); defaults to ~/.config/pagegrid/thresholds.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log strategy decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild every page as one stacked table
    Table {
        /// Page bundle JSON file, or `-` for stdin
        input: PathBuf,

        /// Drop text that is not part of a detected table
        #[arg(short, long)]
        tables_only: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Rebuild every page as reading-order plain text
    Text {
        /// Page bundle JSON file, or `-` for stdin
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "pagegrid=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let thresholds = load_thresholds(cli.config.as_deref())?;

    match cli.command {
        Commands::Table {
            input,
            tables_only,
            format,
        } => cmd_table(&input, thresholds, tables_only, format)?,
        Commands::Text { input } => cmd_text(&input, &thresholds)?,
    }

    Ok(())
}

fn load_thresholds(path: Option<&Path>) -> Result<Thresholds> {
    match path {
        Some(path) => Thresholds::load(path)
            .with_context(|| format!("failed to load thresholds from {}", path.display())),
        None => Thresholds::load_default().context("failed to load default thresholds"),
    }
}

fn load_bundle(input: &Path) -> Result<PageBundle> {
    PageBundle::load(input).with_context(|| format!("failed to read page bundle {}", input.display()))
}

fn cmd_table(input: &Path, thresholds: Thresholds, tables_only: bool, format: Format) -> Result<()> {
    let bundle = load_bundle(input)?;
    let options = ExtractOptions {
        thresholds,
        tables_only,
    };
    let table = compile_tables(&bundle.pages, &bundle.regions, &options);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&table)?),
        Format::Markdown => print!("{}", render::to_markdown(&table)),
    }
    Ok(())
}

fn cmd_text(input: &Path, thresholds: &Thresholds) -> Result<()> {
    let bundle = load_bundle(input)?;
    let text = compile_document(&bundle.pages, &bundle.regions, thresholds);
    println!("{text}");
    Ok(())
}
