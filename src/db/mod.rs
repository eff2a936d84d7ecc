// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database and storage layer (hosted PostgREST + object storage).

pub mod query;
pub mod supabase;

pub use query::{Embed, SelectQuery, VideoFilter};
pub use supabase::SupabaseClient;

use crate::error::{BackendError, Result};
use crate::models::Video;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "usuarios";
    pub const VIDEOS: &str = "videos";
    pub const NUTRITION_PLANS: &str = "planes_nutricionales";
    pub const USER_PROGRESS: &str = "progreso_usuario";
}

/// Entry returned when listing a storage prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageObject {
    pub name: String,
    /// `None` for folder placeholders
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl StorageObject {
    pub fn is_folder(&self) -> bool {
        self.id.is_none()
    }
}

/// Operations the diagnostics need from the hosted backend.
///
/// Rows travel as JSON values; use [`Backend::select_as`] for typed reads.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Run a select and return the raw rows.
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>>;

    /// Exact row count of a table.
    async fn count(&self, table: &str) -> Result<u64>;

    /// Insert one row and return the stored representation.
    async fn insert(&self, table: &str, row: &Value) -> Result<Vec<Value>>;

    /// Delete rows where `column = value` and return the rows actually removed.
    ///
    /// Row-level security can silently filter a delete down to nothing, so an
    /// empty result means the rows are still there.
    async fn delete_eq(&self, table: &str, column: &str, value: &str) -> Result<Vec<Value>>;

    /// Time-limited URL for a private object.
    async fn create_signed_url(&self, bucket: &str, path: &str, expires_in: u64)
        -> Result<String>;

    /// List objects directly under a prefix.
    async fn list_objects(&self, bucket: &str, prefix: &str, limit: u32)
        -> Result<Vec<StorageObject>>;

    /// Run a select and decode every row.
    async fn select_as<T: DeserializeOwned>(&self, query: &SelectQuery) -> Result<Vec<T>> {
        self.select(query)
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(|e| BackendError::Decode(e.to_string())))
            .collect()
    }
}

/// Fetch videos matching a filter.
pub async fn fetch_videos<B: Backend>(backend: &B, filter: &VideoFilter) -> Result<Vec<Video>> {
    let videos: Vec<Video> = backend.select_as(&filter.to_query()).await?;
    tracing::debug!(
        count = videos.len(),
        premium_only = filter.premium_only,
        "Fetched videos"
    );
    Ok(videos)
}
