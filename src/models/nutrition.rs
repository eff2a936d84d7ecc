// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition plan and meal models.

use crate::models::User;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub enum MealType {
    #[serde(rename = "desayuno")]
    Breakfast,
    #[serde(rename = "almuerzo")]
    Lunch,
    #[serde(rename = "cena")]
    Dinner,
    #[serde(rename = "snack")]
    Snack,
}

/// A meal, embedded as JSON inside a nutrition plan row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, rename = "Comida", export_to = "app/src/types/generated/")
)]
pub struct Meal {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub meal_type: MealType,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
    #[serde(rename = "instrucciones", default)]
    pub instructions: String,
    #[serde(rename = "calorias")]
    pub calories: u32,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Daily macronutrient targets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/types/generated/")
)]
pub struct Macros {
    #[serde(rename = "proteinas")]
    pub protein_g: f64,
    #[serde(rename = "carbohidratos")]
    pub carbs_g: f64,
    #[serde(rename = "grasas")]
    pub fat_g: f64,
    #[serde(rename = "calorias")]
    pub calories: u32,
}

/// Nutrition plan stored in the `planes_nutricionales` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, rename = "PlanNutricional", export_to = "app/src/types/generated/")
)]
pub struct NutritionPlan {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "comidas", default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub macros: Macros,
    #[serde(rename = "es_premium", default)]
    pub is_premium: bool,
}

impl NutritionPlan {
    pub fn is_accessible_to(&self, user: &User) -> bool {
        user.plan.can_access(self.is_premium)
    }

    /// Sum of the calories of every meal in the plan.
    pub fn meal_calories(&self) -> u32 {
        self.meals.iter().map(|m| m.calories).sum()
    }
}
