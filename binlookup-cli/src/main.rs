//! binlookup CLI - one-shot BIN lookups and dataset inspection

use anyhow::{Context, Result};
use binlookup_core::{
    BinQuery, Dataset, DatasetConfig, DatasetFetcher, LookupOutcome, LookupResponse,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

#[derive(Parser)]
#[command(name = "binlookup")]
#[command(about = "binlookup - Bank Identification Number issuer lookup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up issuer metadata for a BIN
    Lookup {
        /// BIN to look up (6-16 digits)
        bin: String,

        /// Read the dataset from a local CSV file instead of the network
        #[arg(short, long, conflicts_with = "dataset_url")]
        file: Option<PathBuf>,

        /// Dataset URL
        #[arg(long)]
        dataset_url: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that a BIN is well formed without fetching anything
    Check {
        /// BIN to check
        bin: String,
    },

    /// Parse a local CSV dataset and summarize it
    Inspect {
        /// Dataset file path
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("binlookup=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Lookup {
            bin,
            file,
            dataset_url,
            format,
        } => {
            let found = lookup_command(bin, file, dataset_url, format).await?;
            if !found {
                std::process::exit(1);
            }
        }
        Commands::Check { bin } => {
            check_command(bin);
        }
        Commands::Inspect { file } => {
            inspect_command(file)?;
        }
    }

    Ok(())
}

async fn load_dataset(file: Option<PathBuf>, dataset_url: Option<String>) -> binlookup_core::Result<Dataset> {
    match file {
        Some(path) => {
            debug!("Reading dataset from {}", path.display());
            let contents = fs::read_to_string(&path)?;
            Dataset::parse(&contents)
        }
        None => {
            let config = match dataset_url {
                Some(url) => DatasetConfig::with_url(url),
                None => DatasetConfig::default(),
            };
            DatasetFetcher::new(&config)?.fetch().await
        }
    }
}

/// Returns whether the BIN was found
async fn lookup_command(
    bin: String,
    file: Option<PathBuf>,
    dataset_url: Option<String>,
    format: OutputFormat,
) -> Result<bool> {
    let start = Instant::now();

    let (outcome, response, detail) = match BinQuery::parse(&bin) {
        Err(e) => (LookupOutcome::Invalid, LookupResponse::invalid(), Some(e.to_string())),
        Ok(query) => match load_dataset(file, dataset_url).await {
            Err(e) => (
                LookupOutcome::FetchError,
                LookupResponse::fetch_error(),
                Some(e.to_string()),
            ),
            Ok(dataset) => match dataset.find(&query) {
                Some(record) => (LookupOutcome::Found, LookupResponse::found(&query, record), None),
                None => (LookupOutcome::NotFound, LookupResponse::not_found(), None),
            },
        },
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            print_text(&bin, outcome, &response, detail.as_deref());
            let marker = if response.result {
                "✓".green()
            } else {
                "▸".blue()
            };
            println!(
                "\n{} Total time: {:.3}ms",
                marker,
                start.elapsed().as_secs_f64() * 1000.0
            );
        }
    }

    Ok(response.result)
}

fn print_text(bin: &str, outcome: LookupOutcome, response: &LookupResponse, detail: Option<&str>) {
    let status = match outcome {
        LookupOutcome::Found => response.message.green(),
        LookupOutcome::NotFound => response.message.yellow(),
        LookupOutcome::Invalid | LookupOutcome::FetchError => response.message.red(),
    };

    println!("{} BIN Lookup", "═".blue().bold());
    println!("{} BIN: {}", "▸".blue(), bin);
    println!("{} Status: {}", "▸".blue(), status);

    if let Some(detail) = detail {
        println!("{} Reason: {}", "▸".blue(), detail);
    }

    if let Some(data) = &response.data {
        println!("{} Vendor: {}", "▸".blue(), data.vendor);
        println!("{} Type: {}", "▸".blue(), data.card_type);
        println!("{} Category: {}", "▸".blue(), data.category);
        println!("{} Issuer: {}", "▸".blue(), data.issuer);
        if !data.issuer_phone.is_empty() {
            println!("{} Issuer phone: {}", "▸".blue(), data.issuer_phone);
        }
        if !data.issuer_url.is_empty() {
            println!("{} Issuer URL: {}", "▸".blue(), data.issuer_url);
        }
        println!(
            "{} Country: {} ({}/{})",
            "▸".blue(),
            data.country_name,
            data.iso_code2,
            data.iso_code3
        );
    }
}

fn check_command(bin: String) {
    match BinQuery::parse(&bin) {
        Ok(query) => {
            println!("{} {} is a valid BIN", "✓".green(), query);
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}

fn inspect_command(file: PathBuf) -> Result<()> {
    println!("{} Inspecting {}...", "→".blue(), file.display());

    let contents = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let start = Instant::now();
    match Dataset::parse(&contents) {
        Ok(dataset) => {
            let brands: BTreeSet<&str> = dataset.records().iter().map(|r| r.brand.as_str()).collect();
            let countries: BTreeSet<&str> = dataset
                .records()
                .iter()
                .map(|r| r.iso_code2.as_str())
                .collect();

            println!("{} Dataset is valid!", "✓".green());
            println!("  Rows: {}", dataset.len());
            println!("  Brands: {}", brands.len());
            println!("  Countries: {}", countries.len());
            println!("  Parse time: {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);
        }
        Err(e) => {
            println!("{} Dataset is invalid:", "✗".red());
            println!("  {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
