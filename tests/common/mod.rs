// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futplus::db::{Backend, SelectQuery, StorageObject};
use futplus::error::BackendError;
use serde_json::{json, Value};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

pub const TEST_KEY: &str = "test-anon-key";

// ─────────────────────────────────────────────────────────────────────────────
// In-memory backend with failure injection
// ─────────────────────────────────────────────────────────────────────────────

/// Backend double that records every call.
///
/// Calls are labelled `select {table} {select}`, `count {table}`,
/// `insert {table}`, `delete {table} {column}={value}`,
/// `sign {bucket}/{path}` and `list {bucket}/{prefix}`. A failure registered
/// with [`MockBackend::fail`] applies to every call whose label starts with
/// the given prefix.
#[derive(Default)]
pub struct MockBackend {
    rows: HashMap<String, Vec<Value>>,
    objects: BTreeSet<String>,
    failures: Vec<(String, fn() -> BackendError)>,
    calls: Mutex<Vec<String>>,
    inserted: Mutex<Vec<(String, Value)>>,
    filter_deletes: bool,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, table: &str, rows: Vec<Value>) -> Self {
        self.rows.insert(table.to_string(), rows);
        self
    }

    pub fn with_object(mut self, path: &str) -> Self {
        self.objects.insert(path.to_string());
        self
    }

    pub fn fail(mut self, label_prefix: &str, error: fn() -> BackendError) -> Self {
        self.failures.push((label_prefix.to_string(), error));
        self
    }

    /// Deletes succeed but remove nothing, as under row-level security.
    pub fn filter_deletes(mut self) -> Self {
        self.filter_deletes = true;
        self
    }

    /// Rows inserted and not yet deleted.
    pub fn remaining_rows(&self, table: &str) -> usize {
        self.inserted
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == table)
            .count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, label_prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(label_prefix))
    }

    fn record(&self, label: String) -> Result<(), BackendError> {
        let failure = self
            .failures
            .iter()
            .find(|(prefix, _)| label.starts_with(prefix.as_str()))
            .map(|(_, error)| error());
        self.calls.lock().unwrap().push(label);
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Backend for MockBackend {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, BackendError> {
        self.record(format!("select {} {}", query.table(), query.select_param()))?;
        Ok(self.rows.get(query.table()).cloned().unwrap_or_default())
    }

    async fn count(&self, table: &str) -> Result<u64, BackendError> {
        self.record(format!("count {}", table))?;
        Ok(self.rows.get(table).map(|r| r.len() as u64).unwrap_or(0))
    }

    async fn insert(&self, table: &str, row: &Value) -> Result<Vec<Value>, BackendError> {
        self.record(format!("insert {}", table))?;
        let mut stored = row.clone();
        stored["id"] = json!("row-1");
        self.inserted
            .lock()
            .unwrap()
            .push((table.to_string(), stored.clone()));
        Ok(vec![stored])
    }

    async fn delete_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<Value>, BackendError> {
        self.record(format!("delete {} {}={}", table, column, value))?;
        if self.filter_deletes {
            return Ok(Vec::new());
        }

        let matches = |row: &Value| match &row[column] {
            Value::String(s) => s == value,
            other => other.to_string() == value,
        };
        let mut inserted = self.inserted.lock().unwrap();
        let (deleted, kept): (Vec<_>, Vec<_>) = inserted
            .drain(..)
            .partition(|(t, row)| t == table && matches(row));
        *inserted = kept;
        Ok(deleted.into_iter().map(|(_, row)| row).collect())
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        _expires_in: u64,
    ) -> Result<String, BackendError> {
        self.record(format!("sign {}/{}", bucket, path))?;
        if self.objects.contains(path) {
            Ok(format!("https://mock.local/sign/{}/{}?token=t", bucket, path))
        } else {
            Err(BackendError::NotFound("Object not found".to_string()))
        }
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        _limit: u32,
    ) -> Result<Vec<StorageObject>, BackendError> {
        self.record(format!("list {}/{}", bucket, prefix))?;
        Ok(self
            .objects
            .iter()
            .filter_map(|path| {
                let (dir, name) = path.rsplit_once('/')?;
                (dir == prefix).then(|| StorageObject {
                    name: name.to_string(),
                    id: Some(format!("obj-{}", name)),
                    updated_at: None,
                    metadata: None,
                })
            })
            .collect())
    }
}

#[allow(dead_code)]
pub fn http_error() -> BackendError {
    BackendError::Http("connection reset by peer".to_string())
}

#[allow(dead_code)]
pub fn ambiguous_error() -> BackendError {
    BackendError::Api {
        status: 300,
        code: Some("PGRST201".to_string()),
        message: "Could not embed because more than one relationship was found".to_string(),
        hint: None,
    }
}

#[allow(dead_code)]
pub fn permission_error() -> BackendError {
    BackendError::Api {
        status: 403,
        code: Some("42501".to_string()),
        message: "permission denied for table usuarios".to_string(),
        hint: None,
    }
}

#[allow(dead_code)]
pub fn video_row(id: &str, thumbnail: Option<&str>, premium: bool) -> Value {
    json!({
        "id": id,
        "titulo": format!("Video {}", id),
        "descripcion": "",
        "categoria": "tecnica",
        "duracion": 10,
        "thumbnail": thumbnail,
        "video_url": format!("https://cdn.futplus.app/v/{}.m3u8", id),
        "nivel": "intermedio",
        "es_premium": premium,
        "vistas": 3
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// In-process HTTP fake of the hosted backend
// ─────────────────────────────────────────────────────────────────────────────

/// Object the fake storage knows about.
#[allow(dead_code)]
pub const STORED_THUMBNAIL: &str = "avanzado/tecnica/regate.jpg";

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    apikey == Some(TEST_KEY) && bearer == Some(format!("Bearer {}", TEST_KEY).as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Invalid API key"})),
    )
        .into_response()
}

async fn rest_get(
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let wants_count = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("count=exact"));
    if wants_count {
        return (
            StatusCode::OK,
            [(header::CONTENT_RANGE, "0-0/7")],
            Json(json!([{"id": "u1"}])),
        )
            .into_response();
    }

    let select = params.get("select").cloned().unwrap_or_default();
    match table.as_str() {
        "videos" => Json(json!([video_row(
            "v-1",
            Some("tecnica/avanzado/regate.jpg"),
            true
        )]))
        .into_response(),
        "progreso_usuario" if select.contains('!') => Json(json!([])).into_response(),
        "progreso_usuario" => (
            StatusCode::MULTIPLE_CHOICES,
            Json(json!({
                "code": "PGRST201",
                "details": [],
                "hint": "Try changing 'usuarios' to one of the following: 'usuarios!progreso_usuario_user_id_fkey'",
                "message": "Could not embed because more than one relationship was found for 'progreso_usuario' and 'usuarios'"
            })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"code": "42P01", "message": "relation does not exist"})),
        )
            .into_response(),
    }
}

async fn rest_insert(
    Path(_table): Path<String>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    row["id"] = json!("row-1");
    let representation = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("return=representation"));
    if representation {
        (StatusCode::CREATED, Json(json!([row]))).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn rest_delete(
    Path(_table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let representation = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("return=representation"));
    if !representation {
        return StatusCode::NO_CONTENT.into_response();
    }
    // Any other filter matches nothing, which PostgREST still answers with 200
    match params.get("id").map(String::as_str) {
        Some("eq.row-1") => Json(json!([{"id": "row-1"}])).into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn storage_sign(Path(path): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if path == format!("thumbnails/{}", STORED_THUMBNAIL) {
        Json(json!({"signedURL": format!("/object/sign/{}?token=abc", path)})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"statusCode": "404", "error": "not_found", "message": "Object not found"})),
        )
            .into_response()
    }
}

async fn storage_list(
    Path(bucket): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let prefix = body["prefix"].as_str().unwrap_or_default();
    if bucket == "thumbnails" && prefix == "tecnica/avanzado" {
        Json(json!([
            {"name": "otro.jpg", "id": "obj-1", "updated_at": "2025-05-01T10:00:00Z", "metadata": {"size": 1024}},
            {"name": "sub", "id": null}
        ]))
        .into_response()
    } else {
        Json(json!([])).into_response()
    }
}

fn fake_backend_router() -> Router {
    Router::new()
        .route(
            "/rest/v1/{table}",
            get(rest_get).post(rest_insert).delete(rest_delete),
        )
        .route("/storage/v1/object/sign/{*path}", post(storage_sign))
        .route("/storage/v1/object/list/{bucket}", post(storage_list))
}

/// Serve the fake backend on a random local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_fake_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, fake_backend_router())
            .await
            .expect("Fake backend stopped");
    });
    format!("http://{}", addr)
}
