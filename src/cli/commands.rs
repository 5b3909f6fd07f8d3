//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through JSON files, text files and DuckDB queries
#[derive(Parser, Debug)]
#[command(name = "pagewise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Paging defaults file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of a file
    Page {
        /// JSON array file, or a text file with --lines
        #[arg(short, long)]
        input: PathBuf,

        /// One-based page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Page size (defaults to the configured page size)
        #[arg(short, long)]
        size: Option<usize>,

        /// Do not clamp a page number past the end to the last page
        #[arg(long)]
        no_adjust: bool,

        /// Treat every line of the input as one item, read in a single pass
        #[arg(long)]
        lines: bool,
    },

    /// Print one page of a DuckDB query
    Query {
        /// Database file, or :memory:
        #[arg(long, default_value = ":memory:")]
        database: String,

        /// SELECT statement to page through
        #[arg(long)]
        sql: String,

        /// Statements to run before paging (e.g. creating a table)
        #[arg(long)]
        setup: Option<String>,

        /// One-based page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Page size (defaults to the configured page size)
        #[arg(short, long)]
        size: Option<usize>,

        /// Do not clamp a page number past the end to the last page
        #[arg(long)]
        no_adjust: bool,

        /// Print rows one by one as they are fetched
        #[arg(long)]
        stream: bool,

        /// Cache streamed rows and print the whole page afterwards
        #[arg(long)]
        cache: bool,
    },

    /// Split a file into all of its pages
    Partition {
        /// JSON array file, or a text file with --lines
        #[arg(short, long)]
        input: PathBuf,

        /// Page size (defaults to the configured page size)
        #[arg(short, long)]
        size: Option<usize>,

        /// Treat every line of the input as one item
        #[arg(long)]
        lines: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}
