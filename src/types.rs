//! Common types used throughout pagewise
//!
//! This module contains shared type definitions used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Source Capability
// ============================================================================

/// How a superset can be read, which decides the slicing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// O(1) length and O(1) indexed reads
    RandomAccess,
    /// One sequential traversal, length unknown up front
    SinglePass,
    /// Remote or lazy query with native count and skip/take
    DeferredQuery,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::RandomAccess => "random_access",
            Capability::SinglePass => "single_pass",
            Capability::DeferredQuery => "deferred_query",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Total Count
// ============================================================================

/// Where the total item count for a bounded query comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalCount {
    /// Already known by the caller; the source is not touched
    Known(usize),
    /// Ask the source with a count round trip
    #[default]
    Compute,
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Every deferred item fetch
    Trace,
    /// Strategy selection and query round trips
    Debug,
    /// Command summaries
    #[default]
    Info,
    /// Cancellations and source failures
    Warn,
    /// Errors only
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
