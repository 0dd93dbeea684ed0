//! Validation module
//!
//! Per-meal constraint checks and the plan-level quality gate.

pub mod gate;
pub mod meal;

pub use gate::{evaluate_and_filter_plan, evaluate_with_threshold, GateReport, MealViolation};
pub use meal::{
    validate_allergens, validate_daily_exclusions, validate_diet_type, validate_meal,
    validate_medical_conditions,
};
