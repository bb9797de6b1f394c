// store - remote table query service
//
// The backing store is a remote REST service exposing paginated filter
// queries over named tables. Everything in the crate reaches it through the
// `TableStore` capability; the concrete client is injected at startup.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod repository;
pub mod rest;

/// A raw row as returned by the store.
pub type Row = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store is not configured: {0}")]
    Config(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store returned status {status} for table {table}")]
    Status { table: String, status: u16 },

    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Page selector translated to inclusive range offsets on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub fn new(number: u32, size: u32) -> Self {
        // Page numbers are 1-based; clamp so page 0 reads as page 1
        Self { number: number.max(1), size }
    }

    /// Inclusive (from, to) row offsets for this page.
    pub fn range(&self) -> (u64, u64) {
        let from = (self.number as u64 - 1) * self.size as u64;
        let to = self.number as u64 * self.size as u64;
        (from, to.saturating_sub(1))
    }
}

/// Query parameters for a `list` call: equality filters, column selection,
/// and optional pagination.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<(String, String)>,
    pub select: Option<String>,
    pub page: Option<Page>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter on `column`.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    /// Restrict the returned columns.
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    /// Request a single page of results.
    pub fn page(mut self, number: u32, size: u32) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }
}

/// The remote table query capability.
///
/// Every call is a single best-effort remote read or write; there are no
/// retries and no caching at this layer.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch rows from `table` matching the query, in store order.
    async fn list(&self, table: &str, query: ListQuery) -> Result<Vec<Row>, StoreError>;

    /// Fetch a single row from `table` by its `id` column.
    async fn get(&self, table: &str, id: &str) -> Result<Option<Row>, StoreError>;

    /// Insert a record into `table`, returning the inserted representation.
    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Row>, StoreError>;
}

/// Validate a table or column identifier before it reaches the wire.
///
/// Identifiers must start with a letter or underscore and contain only
/// letters, digits, and underscores.
pub fn validate_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
