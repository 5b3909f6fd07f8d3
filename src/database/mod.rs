//! Deferred query support via DuckDB
//!
//! This module provides a real deferred query source: the total comes from a
//! `COUNT(*)` round trip and each page from a `LIMIT`/`OFFSET` round trip, so
//! the superset is never materialized on this side.

mod engine;

pub use engine::{DatabaseEngine, DatabaseQuery, IN_MEMORY};
