// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models mirrored from the backend tables.

pub mod nutrition;
pub mod progress;
pub mod user;
pub mod video;

pub use nutrition::{Macros, Meal, MealType, NutritionPlan};
pub use progress::{NewUserProgress, UserProgress};
pub use user::{PlanTier, User};
pub use video::{Video, VideoLevel};
