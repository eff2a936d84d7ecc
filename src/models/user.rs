// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Premium,
}

impl PlanTier {
    /// Whether this tier may open a row with the given premium flag.
    pub fn can_access(self, is_premium: bool) -> bool {
        !is_premium || self == PlanTier::Premium
    }
}

/// User profile stored in the `usuarios` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, rename = "Usuario", export_to = "app/src/types/generated/")
)]
pub struct User {
    /// Auth user ID (UUID)
    pub id: String,
    pub email: String,
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "edad", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Preferred playing position
    #[serde(rename = "posicion", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub plan: PlanTier,
    #[serde(rename = "fecha_registro")]
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn is_premium(&self) -> bool {
        self.plan == PlanTier::Premium
    }
}
