// testing - in-memory table store for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{ListQuery, Row, StoreError, TableStore};
use serde_json::Value;

/// In-memory [`TableStore`] with per-table seeding, failure injection, and a
/// call log for asserting which queries ran.
#[derive(Default)]
pub struct MockTableStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    fail_tables: Mutex<HashSet<String>>,
    fail_filter_values: Mutex<HashSet<String>>,
}

impl MockTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows. Values must be JSON objects.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .map(|value| match value {
                Value::Object(map) => map,
                other => panic!("seed rows must be JSON objects, got {other}"),
            })
            .collect();
        self.tables.lock().unwrap().insert(table.to_string(), rows);
    }

    /// Every query against `table` fails from now on.
    pub fn fail_table(&self, table: &str) {
        self.fail_tables.lock().unwrap().insert(table.to_string());
    }

    /// Every query carrying an equality filter with this value fails.
    pub fn fail_filter_value(&self, value: impl ToString) {
        self.fail_filter_values.lock().unwrap().insert(value.to_string());
    }

    /// Number of list calls made against `table`.
    pub fn list_calls(&self, table: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(t, _)| t == table).count()
    }

    /// Current rows of `table`.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }
}

fn value_matches(value: &Value, filter: &str) -> bool {
    match value {
        Value::String(s) => s == filter,
        other => other.to_string() == filter,
    }
}

#[async_trait]
impl TableStore for MockTableStore {
    async fn list(&self, table: &str, query: ListQuery) -> Result<Vec<Row>, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((table.to_string(), query.filters.clone()));

        if self.fail_tables.lock().unwrap().contains(table) {
            return Err(StoreError::Status { table: table.to_string(), status: 500 });
        }
        {
            let failing = self.fail_filter_values.lock().unwrap();
            if query.filters.iter().any(|(_, value)| failing.contains(value)) {
                return Err(StoreError::Status { table: table.to_string(), status: 500 });
            }
        }

        let rows = self.rows(table);
        let matched: Vec<Row> = rows
            .into_iter()
            .filter(|row| {
                query.filters.iter().all(|(column, value)| {
                    row.get(column).map(|v| value_matches(v, value)).unwrap_or(false)
                })
            })
            .collect();

        let paged = match query.page {
            Some(page) => {
                let (from, to) = page.range();
                matched
                    .into_iter()
                    .skip(from as usize)
                    .take((to - from + 1) as usize)
                    .collect()
            }
            None => matched,
        };

        Ok(paged)
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<Row>, StoreError> {
        let rows = self.list(table, ListQuery::new().eq("id", id)).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Row>, StoreError> {
        if self.fail_tables.lock().unwrap().contains(table) {
            return Err(StoreError::Status { table: table.to_string(), status: 500 });
        }

        let Value::Object(row) = record else {
            panic!("insert body must be a JSON object");
        };

        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());

        Ok(vec![row])
    }
}
