//! Meal model
//!
//! A single meal inside a plan day, as produced by the plan generator.

use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

/// Meal type enum
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" | "snacks" => MealType::Snack,
            _ => MealType::Unspecified,
        }
    }
}

impl Default for MealType {
    fn default() -> Self {
        MealType::Unspecified
    }
}

// Generated plans use free-form casing ("Breakfast", "snacks"); unknown tags
// become Unspecified instead of failing the whole plan.
impl<'de> Deserialize<'de> for MealType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MealType::from_str(&raw))
    }
}

/// Macronutrient triple in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Macros {
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

impl Macros {
    pub fn new(protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self { protein_g, carbs_g, fat_g }
    }

    /// Divide each macro by `divisor`, rounded to whole grams
    pub fn apportion(&self, divisor: f64) -> Self {
        Self {
            protein_g: (self.protein_g / divisor).round(),
            carbs_g: (self.carbs_g / divisor).round(),
            fat_g: (self.fat_g / divisor).round(),
        }
    }
}

impl std::ops::Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
        }
    }
}

impl std::iter::Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::default(), |acc, m| acc + m)
    }
}

/// A meal in a generated plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Meal {
    #[serde(rename = "type", default)]
    pub meal_type: MealType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub portions: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub macros: Macros,
    /// Allergens the meal declares about itself
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Meal {
    /// Lowercased name and ingredients joined by spaces.
    ///
    /// This is the only text the validator inspects; quantities and units are
    /// never parsed out of it.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.name, self.ingredients.join(" ")).to_lowercase()
    }
}
