//! User profile model
//!
//! The onboarding profile a plan is generated for.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use super::Constraints;
use crate::error::{NudgeError, NudgeResult};

/// Profile collected during onboarding
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    /// "male" or "female"; anything else uses the female BMR offset
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// sedentary, light, moderate, very-active, extra-active
    #[serde(default)]
    pub activity_level: String,
    /// weight-loss, muscle-gain, maintenance, ...
    #[serde(default)]
    pub goal: String,
    /// Diet type or cuisine (vegan, vegetarian, indian, ...)
    #[serde(default)]
    pub diet_preference: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl UserProfile {
    /// Reject profiles the target formulas cannot handle
    pub fn check(&self) -> NudgeResult<()> {
        if self.age == 0 {
            return Err(NudgeError::InvalidProfile("age must be positive".to_string()));
        }
        if !(self.height_cm > 0.0) {
            return Err(NudgeError::InvalidProfile("height_cm must be positive".to_string()));
        }
        if !(self.weight_kg > 0.0) {
            return Err(NudgeError::InvalidProfile("weight_kg must be positive".to_string()));
        }
        Ok(())
    }

    /// Constraint set implied by the profile (no daily exclusions)
    pub fn constraints(&self) -> Constraints {
        let diet = self.diet_preference.trim();
        Constraints {
            diet_type: (!diet.is_empty()).then(|| diet.to_lowercase()),
            allergens: non_blank(&self.allergies),
            medical_conditions: non_blank(&self.conditions),
            ..Default::default()
        }
    }

    pub fn has_allergy(&self, allergen: &str) -> bool {
        self.allergies
            .iter()
            .any(|a| a.trim().eq_ignore_ascii_case(allergen))
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
