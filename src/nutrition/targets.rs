//! Calorie and macro targets
//!
//! Mifflin-St Jeor BMR, activity-scaled TDEE, goal adjustment, and a
//! protein-first macro split rounded to practical 5 g steps.

use rmcp::schemars;
use serde::Serialize;

use crate::error::NudgeResult;
use crate::models::{Macros, UserProfile};

/// Activity level with its TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
    ExtraActive,
    Unknown,
}

impl ActivityLevel {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "very-active" | "very_active" => ActivityLevel::VeryActive,
            "extra-active" | "extra_active" => ActivityLevel::ExtraActive,
            _ => ActivityLevel::Unknown,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
            ActivityLevel::Unknown => 1.5,
        }
    }
}

/// Weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Maintenance,
}

impl Goal {
    /// Unrecognised goals (clean-eating, diabetes, ...) keep calories at TDEE
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "weight-loss" | "weight_loss" => Goal::WeightLoss,
            "muscle-gain" | "muscle_gain" => Goal::MuscleGain,
            _ => Goal::Maintenance,
        }
    }

    /// Protein grams per kg of body weight
    fn protein_per_kg(&self) -> f64 {
        match self {
            Goal::WeightLoss | Goal::MuscleGain => 2.0,
            Goal::Maintenance => 1.8,
        }
    }
}

/// Share of calories from fat
const FAT_SHARE: f64 = 0.25;

/// Resting energy expenditure in kcal/day
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: &str) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    if gender.trim().eq_ignore_ascii_case("male") {
        base + 5.0
    } else {
        base - 161.0
    }
}

/// Total daily energy expenditure, rounded to whole kcal
pub fn calculate_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    (bmr * activity.multiplier()).round()
}

pub fn calculate_target_calories(tdee: f64, goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => (tdee - 500.0).round(),
        Goal::MuscleGain => (tdee + 300.0).round(),
        Goal::Maintenance => tdee,
    }
}

/// Macro grams for a calorie target; every value is a multiple of 5
pub fn calculate_macros_for_goal(target_calories: f64, weight_kg: f64, goal: Goal) -> Macros {
    let protein = round_to_five(weight_kg * goal.protein_per_kg());
    let fat = round_to_five(target_calories * FAT_SHARE / 9.0);
    let carbs = round_to_five((target_calories - protein * 4.0 - fat * 9.0) / 4.0);

    Macros::new(protein, carbs.max(0.0), fat)
}

fn round_to_five(grams: f64) -> f64 {
    (grams / 5.0).round() * 5.0
}

pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    weight_kg / (meters * meters)
}

/// BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub enum BmiStatus {
    Underweight,
    #[serde(rename = "Healthy Weight")]
    HealthyWeight,
    Overweight,
    Obese,
}

impl BmiStatus {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiStatus::Underweight
        } else if bmi < 25.0 {
            BmiStatus::HealthyWeight
        } else if bmi < 30.0 {
            BmiStatus::Overweight
        } else {
            BmiStatus::Obese
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "Below healthy weight range",
            BmiStatus::HealthyWeight => "Within healthy weight range",
            BmiStatus::Overweight => "Above healthy weight range",
            BmiStatus::Obese => "Significantly above healthy range",
        }
    }
}

/// Everything derived from a profile's body metrics
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct NutritionTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub macros: Macros,
    pub bmi: f64,
    pub bmi_status: BmiStatus,
}

impl UserProfile {
    /// Compute calorie and macro targets; fails on impossible body metrics
    pub fn targets(&self) -> NudgeResult<NutritionTargets> {
        self.check()?;

        let goal = Goal::from_str(&self.goal);
        let bmr = calculate_bmr(self.weight_kg, self.height_cm, self.age, &self.gender);
        let tdee = calculate_tdee(bmr, ActivityLevel::from_str(&self.activity_level));
        let target_calories = calculate_target_calories(tdee, goal);
        let bmi = calculate_bmi(self.weight_kg, self.height_cm);

        Ok(NutritionTargets {
            bmr,
            tdee,
            target_calories,
            macros: calculate_macros_for_goal(target_calories, self.weight_kg, goal),
            bmi: (bmi * 10.0).round() / 10.0,
            bmi_status: BmiStatus::from_bmi(bmi),
        })
    }
}
