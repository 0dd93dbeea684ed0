//! Routine parsing results
//!
//! Shapes produced by the routine parser and by the external interpreter.
//! Field names follow the interpreter's JSON contract (camelCase).

use std::collections::BTreeMap;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use super::ExclusionMap;

/// Positive food preferences extracted from a routine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub preferred_foods: Vec<String>,
    /// Reserved; no extractor fills this yet
    #[serde(default)]
    pub meal_frequency: BTreeMap<String, String>,
}

impl Preferences {
    /// Add a food unless already present. Returns false for duplicates.
    pub fn add_food(&mut self, food: &str) -> bool {
        let food = food.trim().to_lowercase();
        if food.is_empty() || self.preferred_foods.contains(&food) {
            return false;
        }
        self.preferred_foods.push(food);
        true
    }

    /// Append foods from `other` that are not already present
    pub fn merge(&mut self, other: Preferences) {
        for food in &other.preferred_foods {
            self.add_food(food);
        }
        for (meal, frequency) in other.meal_frequency {
            self.meal_frequency.entry(meal).or_insert(frequency);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preferred_foods.is_empty() && self.meal_frequency.is_empty()
    }
}

/// Exclusions and preferences understood from one routine text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RoutineInsights {
    #[serde(default)]
    pub exclusions: ExclusionMap,
    #[serde(default)]
    pub preferences: Preferences,
}

impl RoutineInsights {
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty() && self.preferences.is_empty()
    }
}
