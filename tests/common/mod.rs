// Shared harness for the integration tests: an in-memory table store plus
// helpers for driving the router with oneshot requests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tower::util::ServiceExt;

use civica_api::store::repository::Repository;
use civica_api::store::{ListQuery, Row, StoreError, TableStore};
use civica_api::{app, AppState};

static ENV: Once = Once::new();

/// Test configuration must land in the environment before the config
/// singleton is first touched.
fn init_env() {
    ENV.call_once(|| {
        std::env::set_var("SECURITY_JWT_SECRET", "integration-test-secret");
    });
}

/// In-memory table store backing the integration tests.
#[derive(Default)]
pub struct MockTableStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    fail_tables: Mutex<HashSet<String>>,
}

impl MockTableStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

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

    pub fn fail_table(&self, table: &str) {
        self.fail_tables.lock().unwrap().insert(table.to_string());
    }

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
        if self.fail_tables.lock().unwrap().contains(table) {
            return Err(StoreError::Status { table: table.to_string(), status: 500 });
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

/// Build the full application router over a mock store.
pub fn build_app(store: Arc<MockTableStore>) -> Router {
    init_env();
    app(AppState {
        repository: Repository::new(store),
    })
}

/// Issue a bearer token the way the login endpoint would.
pub fn token_for(username: &str) -> String {
    init_env();
    civica_api::auth::issue_token(username)
        .expect("token issuance should succeed with the test secret")
        .access_token
}

/// Argon2 hash for seeding user rows.
pub fn password_hash(password: &str) -> String {
    civica_api::auth::password::hash_password(password).expect("hashing should succeed")
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub async fn get(app: &Router, path: &str) -> Result<(StatusCode, Value)> {
    send(app, Request::builder().uri(path).body(Body::empty())?).await
}

pub async fn get_with_bearer(app: &Router, path: &str, token: &str) -> Result<(StatusCode, Value)> {
    send(
        app,
        Request::builder()
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())?,
    )
    .await
}

pub async fn get_with_header(
    app: &Router,
    path: &str,
    auth_header: &str,
) -> Result<(StatusCode, Value)> {
    send(
        app,
        Request::builder()
            .uri(path)
            .header(header::AUTHORIZATION, auth_header)
            .body(Body::empty())?,
    )
    .await
}

pub async fn post_json(app: &Router, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body)?))?,
    )
    .await
}

/// Convenience: a Map row for assertions.
pub fn as_object(value: &Value) -> &Map<String, Value> {
    value.as_object().expect("expected a JSON object")
}
