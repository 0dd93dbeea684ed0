//! Meal plan model
//!
//! A multi-day plan: summary targets plus ordered days of meals.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use super::{Macros, Meal, Weekday};

/// Plan-level targets and notes
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlanSummary {
    #[serde(default)]
    pub target_calories: f64,
    #[serde(default)]
    pub macros: Macros,
    #[serde(default)]
    pub notes: String,
}

/// One day of a plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Day {
    /// Display label from the generator ("Day 1"); weekday comes from position
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl Day {
    pub fn calories(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    pub fn macros(&self) -> Macros {
        self.meals.iter().map(|m| m.macros).sum()
    }
}

/// A generated meal plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Plan {
    #[serde(default)]
    pub summary: PlanSummary,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Plan {
    pub fn meal_count(&self) -> usize {
        self.days.iter().map(|d| d.meals.len()).sum()
    }

    /// Days paired with their positional weekday
    pub fn weekdays(&self) -> impl Iterator<Item = (Weekday, &Day)> {
        self.days
            .iter()
            .enumerate()
            .map(|(index, day)| (Weekday::from_index(index), day))
    }

    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        self.days.iter().flat_map(|d| d.meals.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parses_generator_output() {
        let plan: Plan = serde_json::from_value(serde_json::json!({
            "summary": {
                "target_calories": 1800,
                "macros": { "protein_g": 150, "carbs_g": 190, "fat_g": 50 },
                "notes": "Low GI focus"
            },
            "days": [
                { "day": "Day 1", "meals": [
                    { "type": "breakfast", "name": "Oats", "portions": "1 bowl", "calories": 300,
                      "macros": { "protein_g": 10, "carbs_g": 50, "fat_g": 6 }, "allergens": [], "tags": ["low_gi"] },
                    { "type": "lunch", "name": "Dal", "portions": "1 bowl", "calories": 400,
                      "macros": { "protein_g": 20, "carbs_g": 60, "fat_g": 8 } }
                ] }
            ]
        }))
        .unwrap();

        assert_eq!(plan.meal_count(), 2);
        assert_eq!(plan.days[0].calories(), 700.0);
        assert_eq!(plan.days[0].macros().protein_g, 30.0);
    }

    #[test]
    fn test_weekdays_wrap_after_seven_days() {
        let plan = Plan {
            days: vec![Day::default(); 9],
            ..Default::default()
        };
        let labels: Vec<Weekday> = plan.weekdays().map(|(w, _)| w).collect();
        assert_eq!(labels[0], Weekday::Monday);
        assert_eq!(labels[7], Weekday::Monday);
        assert_eq!(labels[8], Weekday::Tuesday);
    }
}
