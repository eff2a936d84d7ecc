// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Thumbnail path normalization and signed-URL inspection.
//!
//! Thumbnails are stored as `dir1/dir2/file` inside a private bucket. Older
//! uploads wrote the two directory segments in the opposite order, so a
//! path that cannot be signed is retried once with the segments swapped.

use crate::config::Config;
use crate::db::{fetch_videos, Backend, VideoFilter};
use crate::error::BackendError;
use crate::time_utils::format_utc_rfc3339;
use chrono::{Duration, Utc};
use std::borrow::Cow;
use std::fmt;

const STORAGE_OBJECT_MARKER: &str = "/storage/v1/object/";
const ACCESS_PREFIXES: [&str; 3] = ["public/", "sign/", "authenticated/"];
const LISTING_LIMIT: u32 = 100;

/// Reduce a stored thumbnail reference to an object path inside `bucket`.
///
/// Accepts bare paths, paths prefixed with the bucket name, and full
/// storage URLs (public or signed). Returns `None` when nothing usable
/// remains, including for URLs that do not point at the storage API.
pub fn normalize_thumbnail_path(raw: &str, bucket: &str) -> Option<String> {
    let mut path = raw.trim();

    if let Some(idx) = path.find(|c: char| c == '?' || c == '#') {
        path = &path[..idx];
    }

    if let Some(idx) = path.find(STORAGE_OBJECT_MARKER) {
        path = &path[idx + STORAGE_OBJECT_MARKER.len()..];
        if let Some(rest) = ACCESS_PREFIXES.iter().find_map(|p| path.strip_prefix(p)) {
            path = rest;
        }
    } else if path.contains("://") {
        return None;
    }

    let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
    let mut segments: Vec<&str> = decoded.split('/').filter(|s| !s.is_empty()).collect();
    if segments.first() == Some(&bucket) {
        segments.remove(0);
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// `dir1/dir2/file` → `dir2/dir1/file`; `None` for any other shape or
/// when both directories are the same.
pub fn swap_directory_segments(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        [first, second, file] if first != second => Some(format!("{}/{}/{}", second, first, file)),
        _ => None,
    }
}

/// Paths to try, in order: the path as stored, then the swapped variant.
pub fn candidate_paths(path: &str) -> Vec<String> {
    let mut candidates = vec![path.to_string()];
    candidates.extend(swap_directory_segments(path));
    candidates
}

/// Directory containing an object (empty for objects at the bucket root).
pub fn parent_prefix(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// What happened when signing one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectionResult {
    /// A candidate path was signed
    Signed {
        path: String,
        url: String,
        /// Absent when the lifetime cannot be represented as a timestamp
        expires_at: Option<String>,
        swapped: bool,
    },
    /// Every candidate was missing; `listing` is the original directory
    NotFound {
        tried: Vec<String>,
        listing: Vec<String>,
    },
    /// Signing failed for a reason other than a missing object
    Failed { path: String, error: String },
    /// The stored reference did not yield a storage path
    MissingThumbnail,
}

/// One inspected thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailInspection {
    pub label: String,
    pub raw: Option<String>,
    pub result: InspectionResult,
}

impl ThumbnailInspection {
    pub fn is_signed(&self) -> bool {
        matches!(self.result, InspectionResult::Signed { .. })
    }
}

impl fmt::Display for ThumbnailInspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw.as_deref().unwrap_or("<none>");
        match &self.result {
            InspectionResult::Signed {
                path,
                url,
                expires_at,
                swapped,
            } => {
                write!(f, "✅ {} [{}]", self.label, raw)?;
                if *swapped {
                    write!(f, "\n   found under swapped path {}", path)?;
                }
                match expires_at {
                    Some(at) => write!(f, "\n   {} (expires {})", url, at),
                    None => write!(f, "\n   {}", url),
                }
            }
            InspectionResult::NotFound { tried, listing } => {
                write!(f, "❌ {} [{}] not found as {}", self.label, raw, tried.join(" or "))?;
                if listing.is_empty() {
                    write!(f, "\n   directory listing is empty")
                } else {
                    write!(f, "\n   directory contains: {}", listing.join(", "))
                }
            }
            InspectionResult::Failed { path, error } => {
                write!(f, "❌ {} [{}] {}: {}", self.label, raw, path, error)
            }
            InspectionResult::MissingThumbnail => {
                write!(f, "⚠️  {} [{}] has no usable thumbnail path", self.label, raw)
            }
        }
    }
}

/// What to inspect: one stored reference, or a sample of videos.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectionTarget {
    Path(String),
    Videos(VideoFilter),
}

/// Signs thumbnails, falling back to a directory listing and the swapped path.
pub struct ThumbnailInspector<'a, B> {
    backend: &'a B,
    bucket: String,
    ttl_secs: u64,
}

impl<'a, B: Backend> ThumbnailInspector<'a, B> {
    pub fn new(backend: &'a B, config: &Config) -> Self {
        Self {
            backend,
            bucket: config.thumbnail_bucket.clone(),
            ttl_secs: config.signed_url_ttl_secs,
        }
    }

    /// Inspect one stored thumbnail reference.
    pub async fn inspect(&self, label: &str, raw: Option<&str>) -> ThumbnailInspection {
        let result = match raw.and_then(|r| normalize_thumbnail_path(r, &self.bucket)) {
            Some(path) => self.sign_candidates(&path).await,
            None => InspectionResult::MissingThumbnail,
        };

        ThumbnailInspection {
            label: label.to_string(),
            raw: raw.map(str::to_string),
            result,
        }
    }

    /// Inspect a direct path without touching the videos table, or sample videos.
    pub async fn run(
        &self,
        target: &InspectionTarget,
    ) -> Result<Vec<ThumbnailInspection>, BackendError> {
        match target {
            InspectionTarget::Path(path) => {
                Ok(vec![self.inspect("direct path", Some(path.as_str())).await])
            }
            InspectionTarget::Videos(filter) => self.inspect_videos(filter).await,
        }
    }

    /// Sample videos from the table and inspect each thumbnail.
    pub async fn inspect_videos(
        &self,
        filter: &VideoFilter,
    ) -> Result<Vec<ThumbnailInspection>, BackendError> {
        let videos = fetch_videos(self.backend, filter).await?;
        tracing::info!(count = videos.len(), "Inspecting video thumbnails");

        let mut inspections = Vec::with_capacity(videos.len());
        for video in &videos {
            let label = format!("{} ({})", video.title, video.id);
            inspections.push(self.inspect(&label, video.thumbnail.as_deref()).await);
        }
        Ok(inspections)
    }

    async fn sign_candidates(&self, path: &str) -> InspectionResult {
        let candidates = candidate_paths(path);
        let mut listing = Vec::new();

        for (attempt, candidate) in candidates.iter().enumerate() {
            match self
                .backend
                .create_signed_url(&self.bucket, candidate, self.ttl_secs)
                .await
            {
                Ok(url) => {
                    let expires_at = i64::try_from(self.ttl_secs)
                        .ok()
                        .and_then(Duration::try_seconds)
                        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                        .map(format_utc_rfc3339);
                    return InspectionResult::Signed {
                        path: candidate.clone(),
                        url,
                        expires_at,
                        swapped: attempt > 0,
                    };
                }
                Err(e) if e.is_not_found() => {
                    tracing::warn!(bucket = %self.bucket, path = %candidate, "Thumbnail not found");
                    if attempt == 0 {
                        listing = self.list_directory(parent_prefix(candidate)).await;
                    }
                }
                Err(e) => {
                    return InspectionResult::Failed {
                        path: candidate.clone(),
                        error: e.to_string(),
                    };
                }
            }
        }

        InspectionResult::NotFound {
            tried: candidates,
            listing,
        }
    }

    async fn list_directory(&self, prefix: &str) -> Vec<String> {
        match self
            .backend
            .list_objects(&self.bucket, prefix, LISTING_LIMIT)
            .await
        {
            Ok(objects) => objects
                .into_iter()
                .map(|o| if o.is_folder() { format!("{}/", o.name) } else { o.name })
                .collect(),
            Err(e) => {
                tracing::warn!(prefix, error = %e, "Failed to list thumbnail directory");
                Vec::new()
            }
        }
    }
}
