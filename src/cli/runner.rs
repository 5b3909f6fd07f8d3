//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::PagingConfig;
use crate::database::DatabaseEngine;
use crate::error::{Error, Result, ResultExt};
use crate::metadata::{MetadataExt, PagedListMetadata};
use crate::partition::partition;
use crate::query::{query_to_async_page, query_to_page};
use crate::slicing::{PageRequest, SinglePass, ToPage};
use crate::types::LogLevel;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Page {
                input,
                page,
                size,
                no_adjust,
                lines,
            } => self.page(input, *page, *size, *no_adjust, *lines),
            Commands::Query {
                database,
                sql,
                setup,
                page,
                size,
                no_adjust,
                stream,
                cache,
            } => {
                let config = self.load_config()?;
                let request = build_request(&config, *page, *size, *no_adjust);
                let engine = DatabaseEngine::open(database)?;
                if let Some(setup) = setup {
                    engine.execute_batch(setup)?;
                }

                if *stream {
                    self.query_stream(&engine, sql, request, *cache || config.cache_items)
                        .await
                } else {
                    let page = query_to_page(engine.query(sql.as_str()), request).await?;
                    self.output_page(&page)
                }
            }
            Commands::Partition { input, size, lines } => self.partition(input, *size, *lines),
        }
    }

    /// Log level the binary should start with
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            return LogLevel::Debug;
        }
        self.load_config()
            .map(|config| config.log_level)
            .unwrap_or_default()
    }

    /// Load paging defaults
    fn load_config(&self) -> Result<PagingConfig> {
        match &self.cli.config {
            Some(path) => PagingConfig::from_file(path),
            None => Ok(PagingConfig::default()),
        }
    }

    /// Print one page of a file
    fn page(
        &self,
        input: &Path,
        page_number: usize,
        page_size: Option<usize>,
        no_adjust: bool,
        lines: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let request = build_request(&config, page_number, page_size, no_adjust);

        let page = if lines {
            let file = fs::File::open(input)
                .with_context(|| format!("Failed to open input file '{}'", input.display()))?;
            let mut failure = None;
            let items = BufReader::new(file).lines().map_while(|line| match line {
                Ok(line) => Some(Value::String(line)),
                Err(e) => {
                    failure = Some(e);
                    None
                }
            });

            let page = SinglePass::new(items).to_page_with(request)?;
            if let Some(e) = failure {
                return Err(e.into());
            }
            page
        } else {
            let items = load_items(input)?;
            items.as_slice().to_page_with(request)?
        };

        self.output_page(&page)
    }

    /// Split a file into all of its pages
    fn partition(&self, input: &Path, page_size: Option<usize>, lines: bool) -> Result<()> {
        let config = self.load_config()?;
        let page_size = page_size.unwrap_or(config.default_page_size);

        let items = if lines {
            fs::read_to_string(input)
                .with_context(|| format!("Failed to read input file '{}'", input.display()))?
                .lines()
                .map(|line| Value::String(line.to_string()))
                .collect()
        } else {
            load_items(input)?
        };

        let pages = partition(items, page_size)?;
        tracing::info!(pages = pages.len(), page_size, "Partitioned input");

        for page in &pages {
            self.output_page(page)?;
        }
        Ok(())
    }

    /// Stream one page of a query row by row
    async fn query_stream(
        &self,
        engine: &DatabaseEngine,
        sql: &str,
        request: PageRequest,
        cache_items: bool,
    ) -> Result<()> {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.cancel();
            }
        });

        let result = self
            .list_async_page(engine, sql, request, cache_items, &cancel)
            .await;
        ctrl_c.abort();
        result
    }

    async fn list_async_page(
        &self,
        engine: &DatabaseEngine,
        sql: &str,
        request: PageRequest,
        cache_items: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut page = query_to_async_page(engine.query(sql), request, cache_items).await?;
        self.output_value(&metadata_json(&page));

        let Some(list) = page.as_paged_list_mut() else {
            return Ok(());
        };

        while let Some(row) = list.next(cancel).await? {
            self.output_value(&row);
        }

        tracing::debug!(phase = ?list.phase(), "Finished streaming page");

        if list.caches_items() {
            let rows = list.collect(cancel).await?;
            self.output_value(&json!({ "items": rows }));
        }
        Ok(())
    }

    /// Output a page
    fn output_page<P: Serialize + PagedListMetadata>(&self, page: &P) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(page)?);
            }
            OutputFormat::Pretty => {
                println!("{}", summary(page));
                println!("{}", serde_json::to_string_pretty(page)?);
            }
        }
        Ok(())
    }

    /// Output a single value
    fn output_value(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Command-line overrides on top of the configured defaults
fn build_request(
    config: &PagingConfig,
    page_number: usize,
    page_size: Option<usize>,
    no_adjust: bool,
) -> PageRequest {
    let mut request = config.request(page_number);
    if let Some(page_size) = page_size {
        request.page_size = page_size;
    }
    if no_adjust {
        request.adjust_last_page_when_exceeding = false;
    }
    request
}

/// Read a JSON array file
fn load_items(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read input file '{}': {e}", path.display()))
    })?;

    match serde_json::from_str(&content)? {
        Value::Array(items) => Ok(items),
        _ => Err(Error::config(format!(
            "Input file '{}' must contain a JSON array",
            path.display()
        ))),
    }
}

/// Page metadata as a JSON object, with nulls on the empty sentinel
fn metadata_json<P: PagedListMetadata>(page: &P) -> Value {
    json!({
        "page_number": page.page_number().ok(),
        "page_size": page.page_size(),
        "total_item_count": page.total_item_count(),
        "page_count": page.page_count(),
        "item_count_on_page": page.item_count_on_page().ok(),
        "has_previous_page": page.has_previous_page(),
        "has_next_page": page.has_next_page(),
    })
}

/// One-line description of where a page sits
fn summary<P: PagedListMetadata>(page: &P) -> String {
    match page.metadata() {
        Ok(metadata) => {
            let position = match (page.is_first_page(), page.is_last_page()) {
                (true, true) => " (only page)",
                (true, false) => " (first page)",
                (false, true) => " (last page)",
                (false, false) => "",
            };
            format!(
                "Page {} of {}{position}: {} of {} items, page size {}",
                metadata.page_number,
                metadata.page_count,
                metadata.item_count_on_page,
                metadata.total_item_count,
                metadata.page_size,
            )
        }
        Err(_) => format!("No pages: the input is empty, page size {}", page.page_size()),
    }
}
