// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the hosted backend.
//!
//! Handles:
//! - Table reads, inserts, deletes and exact counts (`/rest/v1`)
//! - Signed URLs and prefix listings for object storage (`/storage/v1`)
//! - Classification of error bodies into [`BackendError`]

use crate::config::Config;
use crate::db::{Backend, SelectQuery, StorageObject};
use crate::error::{BackendError, Result};
use reqwest::header::CONTENT_RANGE;
use serde::Deserialize;
use serde_json::{json, Value};

/// Backend client. Constructed explicitly and passed to each operation.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.supabase_url, &config.api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn storage_url(&self, route: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, route)
    }

    /// Request with the key sent both as `apikey` and bearer token.
    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status, body = %body, "Backend request failed");
        Err(BackendError::from_response(status, &body))
    }

    async fn send_json<T: for<'de> Deserialize<'de>>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T> {
        self.send(builder)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Encode each segment of an object path, keeping the separators.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Total from a `Content-Range` header such as `0-0/42` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[derive(Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

impl Backend for SupabaseClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>> {
        let builder = self
            .request(reqwest::Method::GET, &self.rest_url(query.table()))
            .query(&query.query_pairs());
        self.send_json(builder).await
    }

    async fn count(&self, table: &str) -> Result<u64> {
        let builder = self
            .request(reqwest::Method::GET, &self.rest_url(table))
            .query(&[("select", "*"), ("limit", "1")])
            .header("Prefer", "count=exact");

        let response = self.send(builder).await?;
        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| BackendError::Decode("missing Content-Range header".to_string()))?;

        parse_content_range_total(header)
            .ok_or_else(|| BackendError::Decode(format!("unexpected Content-Range: {}", header)))
    }

    async fn insert(&self, table: &str, row: &Value) -> Result<Vec<Value>> {
        let builder = self
            .request(reqwest::Method::POST, &self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(row);
        self.send_json(builder).await
    }

    async fn delete_eq(&self, table: &str, column: &str, value: &str) -> Result<Vec<Value>> {
        let builder = self
            .request(reqwest::Method::DELETE, &self.rest_url(table))
            .query(&[(column, format!("eq.{}", value))])
            .header("Prefer", "return=representation");
        self.send_json(builder).await
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String> {
        let route = format!("object/sign/{}/{}", bucket, encode_object_path(path));
        let builder = self
            .request(reqwest::Method::POST, &self.storage_url(&route))
            .json(&json!({ "expiresIn": expires_in }));

        let signed: SignedUrlResponse = self.send_json(builder).await?;

        // The storage API returns a path relative to /storage/v1
        if signed.signed_url.starts_with("http") {
            Ok(signed.signed_url)
        } else {
            Ok(format!("{}/storage/v1{}", self.base_url, signed.signed_url))
        }
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        limit: u32,
    ) -> Result<Vec<StorageObject>> {
        let route = format!("object/list/{}", bucket);
        let builder = self
            .request(reqwest::Method::POST, &self.storage_url(&route))
            .json(&json!({
                "prefix": prefix,
                "limit": limit,
                "offset": 0,
                "sortBy": { "column": "name", "order": "asc" },
            }));
        self.send_json(builder).await
    }
}
