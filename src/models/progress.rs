// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily user progress model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Progress record stored in the `progreso_usuario` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, rename = "ProgresoUsuario", export_to = "app/src/types/generated/")
)]
pub struct UserProgress {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "entrenamiento_completado", default)]
    pub training_completed: bool,
    #[serde(rename = "nutricion_completada", default)]
    pub nutrition_completed: bool,
    #[serde(rename = "videos_vistos", default)]
    pub viewed_video_ids: Vec<String>,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Insert payload for `progreso_usuario` (the backend assigns the id).
#[derive(Debug, Clone, Serialize)]
pub struct NewUserProgress {
    pub user_id: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "entrenamiento_completado")]
    pub training_completed: bool,
    #[serde(rename = "nutricion_completada")]
    pub nutrition_completed: bool,
    #[serde(rename = "videos_vistos")]
    pub viewed_video_ids: Vec<String>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewUserProgress {
    /// Empty progress entry for a user on a given day.
    pub fn empty(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            training_completed: false,
            nutrition_completed: false,
            viewed_video_ids: Vec::new(),
            notes: None,
        }
    }
}
