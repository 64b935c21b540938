//! resumen CLI - dataset summaries and quality diagnostics.
//!
//! Thin glue over the analysis core: load a table from a file, run the
//! requested analyzers, print or write the result.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod basic;
mod report;

/// resumen - Dataset Summaries and Quality Diagnostics in Pure Rust
#[derive(Parser)]
#[command(name = "resumen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display dataset information
    Info {
        /// Path to dataset file
        path: PathBuf,
    },
    /// Display first N rows of a dataset
    Head {
        /// Path to dataset file
        path: PathBuf,
        /// Number of rows to display
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,
    },
    /// Display dataset schema
    Schema {
        /// Path to dataset file
        path: PathBuf,
    },
    /// Per-column descriptive statistics
    Summary {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Per-column missing-value report
    Missing {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Pearson correlation matrix over numeric columns
    Corr {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Top-K frequency tables for categorical columns
    Categories {
        /// Path to dataset file
        path: PathBuf,
        /// Maximum number of categorical columns to profile
        #[arg(long, default_value = "10")]
        max_columns: usize,
        /// Maximum number of values per frequency table
        #[arg(long, default_value = "10")]
        top_k: usize,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Data-quality flags and overall score
    Flags {
        /// Path to dataset file
        path: PathBuf,
        /// Zero-share threshold for the excess-zero detector (0.0 to 1.0)
        #[arg(long, default_value = "0.5")]
        zero_threshold: f64,
        /// Unique-share threshold for the high-cardinality detector (0.0 to 1.0)
        #[arg(long, default_value = "0.5")]
        cardinality_threshold: f64,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Full report: summary, missing values, correlations, categories, flags
    Report {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Write the report to a file instead of stdout (JSON format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the resumen CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { path } => basic::cmd_info(&path),
        Commands::Head { path, rows } => basic::cmd_head(&path, rows),
        Commands::Schema { path } => basic::cmd_schema(&path),
        Commands::Summary { path, format } => report::cmd_summary(&path, &format),
        Commands::Missing { path, format } => report::cmd_missing(&path, &format),
        Commands::Corr { path, format } => report::cmd_corr(&path, &format),
        Commands::Categories {
            path,
            max_columns,
            top_k,
            format,
        } => report::cmd_categories(&path, max_columns, top_k, &format),
        Commands::Flags {
            path,
            zero_threshold,
            cardinality_threshold,
            format,
        } => report::cmd_flags(&path, zero_threshold, cardinality_threshold, &format),
        Commands::Report {
            path,
            format,
            output,
        } => report::cmd_report(&path, &format, output.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
