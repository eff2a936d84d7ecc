// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training video model.

use crate::models::User;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Difficulty level of a training video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub enum VideoLevel {
    #[serde(rename = "principiante")]
    Beginner,
    #[serde(rename = "intermedio")]
    Intermediate,
    #[serde(rename = "avanzado")]
    Advanced,
}

/// Training video stored in the `videos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub struct Video {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Free-form category (e.g. "tecnica", "fisico", "tactica")
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "duracion")]
    pub duration_minutes: u32,
    /// Storage path or URL of the thumbnail; normalized before signing
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub video_url: String,
    #[serde(rename = "nivel")]
    pub level: VideoLevel,
    #[serde(rename = "es_premium", default)]
    pub is_premium: bool,
    #[serde(rename = "vistas", default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub views: u64,
}

impl Video {
    pub fn is_accessible_to(&self, user: &User) -> bool {
        user.plan.can_access(self.is_premium)
    }
}
