//! CLI module
//!
//! Command-line interface for paging files and DuckDB queries.
//!
//! # Commands
//!
//! - `page` - Print one page of a JSON array or a text file
//! - `query` - Print one page of a SQL query, optionally row by row
//! - `partition` - Split a file into all of its pages

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
