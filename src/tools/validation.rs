//! Validation MCP Tools
//!
//! Tools for checking single meals and gating whole plans.

use serde::Serialize;

use crate::config::PolicyConfig;
use crate::models::{Constraints, Meal, Plan, Weekday};
use crate::validation::{self, MealViolation};

/// Response for validate_meal
#[derive(Debug, Serialize)]
pub struct ValidateMealResponse {
    pub meal_name: String,
    pub weekday: Weekday,
    pub is_valid: bool,
    pub violations: Vec<String>,
}

/// Response for evaluate_plan
#[derive(Debug, Serialize)]
pub struct EvaluatePlanResponse {
    pub accepted: bool,
    /// True when the caller must switch to the fallback plan
    pub use_fallback: bool,
    pub total_meals: usize,
    pub violating_meals: usize,
    pub violation_ratio: f64,
    pub threshold: f64,
    pub removed: Vec<MealViolation>,
    /// Filtered plan when accepted
    pub plan: Option<Plan>,
}

/// Resolve a weekday from an explicit name or a zero-based plan day index
pub fn resolve_weekday(weekday: Option<&str>, day_index: Option<usize>) -> Result<Weekday, String> {
    match (weekday, day_index) {
        (Some(name), _) => Weekday::parse(name).ok_or_else(|| format!("'{}' is not a weekday name", name)),
        (None, Some(index)) => Ok(Weekday::from_index(index)),
        (None, None) => Err("either weekday or day_index is required".to_string()),
    }
}

/// Validate one meal against a constraint set
pub fn validate_meal(
    meal: &Meal,
    weekday: Weekday,
    constraints: &Constraints,
) -> Result<ValidateMealResponse, String> {
    constraints.check().map_err(|e| e.to_string())?;

    let result = validation::validate_meal(meal, weekday, constraints);

    Ok(ValidateMealResponse {
        meal_name: meal.name.clone(),
        weekday,
        is_valid: result.is_valid,
        violations: result.violations,
    })
}

/// Run the quality gate over a candidate plan
pub fn evaluate_plan(
    plan: &Plan,
    constraints: &Constraints,
    policy: &PolicyConfig,
) -> Result<EvaluatePlanResponse, String> {
    constraints.check().map_err(|e| e.to_string())?;

    let report = validation::evaluate_with_threshold(plan, constraints, policy.max_violation_ratio);

    Ok(EvaluatePlanResponse {
        accepted: report.accepted,
        use_fallback: !report.accepted,
        total_meals: report.total_meals,
        violating_meals: report.violating_meals,
        violation_ratio: report.violation_ratio,
        threshold: report.threshold,
        removed: report.removed,
        plan: report.plan,
    })
}
