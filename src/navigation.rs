// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation route param lists shared with the mobile app.
//!
//! Routes serialize as `{"screen": "...", "params": {...}}`, matching what
//! the app's navigator receives.

use crate::models::{NutritionPlan, User, Video};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Screens reachable before sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(tag = "screen", content = "params")]
pub enum AuthRoute {
    Login,
    Register,
    ForgotPassword,
}

/// Bottom tab screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(tag = "screen", content = "params")]
pub enum MainTabRoute {
    Home,
    Videos {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    Nutrition,
    Progress,
    Profile,
}

/// Root stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
#[serde(tag = "screen", content = "params")]
pub enum RootRoute {
    Auth(AuthRoute),
    Main(MainTabRoute),
    VideoPlayer { video_id: String },
    NutritionPlanDetail { plan_id: String },
    Paywall,
}

impl RootRoute {
    /// Navigator screen name.
    pub fn screen_name(&self) -> &'static str {
        match self {
            RootRoute::Auth(_) => "Auth",
            RootRoute::Main(_) => "Main",
            RootRoute::VideoPlayer { .. } => "VideoPlayer",
            RootRoute::NutritionPlanDetail { .. } => "NutritionPlanDetail",
            RootRoute::Paywall => "Paywall",
        }
    }

    /// Route for opening a video, or the paywall when the user's tier
    /// does not cover it.
    pub fn for_video(video: &Video, user: &User) -> Self {
        if video.is_accessible_to(user) {
            RootRoute::VideoPlayer {
                video_id: video.id.clone(),
            }
        } else {
            RootRoute::Paywall
        }
    }

    /// Route for opening a nutrition plan, gated the same way as videos.
    pub fn for_plan(plan: &NutritionPlan, user: &User) -> Self {
        if plan.is_accessible_to(user) {
            RootRoute::NutritionPlanDetail {
                plan_id: plan.id.clone(),
            }
        } else {
            RootRoute::Paywall
        }
    }

    /// Whether the screen requires a signed-in session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, RootRoute::Auth(_))
    }
}
