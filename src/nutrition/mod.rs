//! Nutrition calculation module
//!
//! Calorie and macro target arithmetic for a user profile.

pub mod targets;

pub use targets::{
    calculate_bmi, calculate_bmr, calculate_macros_for_goal, calculate_target_calories,
    calculate_tdee, ActivityLevel, BmiStatus, Goal, NutritionTargets,
};
