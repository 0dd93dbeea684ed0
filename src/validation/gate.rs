//! Plan quality gate
//!
//! Validates every meal of a candidate plan, strips the violating ones, and
//! decides whether what remains is usable. Sporadic bad meals are dropped;
//! a violation ratio above the threshold rejects the plan outright so the
//! caller substitutes the fallback plan.

use serde::Serialize;

use super::meal::validate_meal;
use crate::config::DEFAULT_MAX_VIOLATION_RATIO;
use crate::models::{Constraints, Day, Plan, Weekday};

/// A meal removed from the plan and why
#[derive(Debug, Clone, Serialize)]
pub struct MealViolation {
    pub day_index: usize,
    pub weekday: Weekday,
    pub meal_name: String,
    pub violations: Vec<String>,
}

/// Gate verdict plus the counts behind it
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    /// False means the caller must use the fallback plan
    pub accepted: bool,
    /// Filtered plan; None when rejected
    pub plan: Option<Plan>,
    pub total_meals: usize,
    pub violating_meals: usize,
    pub violation_ratio: f64,
    pub threshold: f64,
    pub removed: Vec<MealViolation>,
}

/// Evaluate a candidate plan with the default 0.30 threshold
pub fn evaluate_and_filter_plan(candidate: &Plan, constraints: &Constraints) -> GateReport {
    evaluate_with_threshold(candidate, constraints, DEFAULT_MAX_VIOLATION_RATIO)
}

/// Evaluate a candidate plan.
///
/// Days are visited in index order and meals in list order; day `i` is
/// validated as weekday `i % 7`. An empty plan has ratio 0 and is accepted.
pub fn evaluate_with_threshold(
    candidate: &Plan,
    constraints: &Constraints,
    max_violation_ratio: f64,
) -> GateReport {
    let mut total_meals = 0usize;
    let mut removed = Vec::new();
    let mut days = Vec::with_capacity(candidate.days.len());

    for (day_index, (weekday, day)) in candidate.weekdays().enumerate() {
        let mut kept = Vec::with_capacity(day.meals.len());

        for meal in &day.meals {
            total_meals += 1;
            let result = validate_meal(meal, weekday, constraints);
            if result.is_valid {
                kept.push(meal.clone());
            } else {
                tracing::debug!(
                    "Dropping \"{}\" on {}: {}",
                    meal.name,
                    weekday,
                    result.violations.join("; ")
                );
                removed.push(MealViolation {
                    day_index,
                    weekday,
                    meal_name: meal.name.clone(),
                    violations: result.violations,
                });
            }
        }

        days.push(Day {
            day: day.day.clone(),
            meals: kept,
        });
    }

    let violating_meals = removed.len();
    let violation_ratio = if total_meals == 0 {
        0.0
    } else {
        violating_meals as f64 / total_meals as f64
    };
    let accepted = violation_ratio <= max_violation_ratio;

    if accepted {
        tracing::info!(
            "Plan accepted: {}/{} meals removed (ratio {:.2})",
            violating_meals,
            total_meals,
            violation_ratio
        );
    } else {
        tracing::warn!(
            "Plan rejected: {}/{} meals violate constraints (ratio {:.2} > {:.2})",
            violating_meals,
            total_meals,
            violation_ratio,
            max_violation_ratio
        );
    }

    let plan = accepted.then(|| Plan {
        summary: candidate.summary.clone(),
        days,
    });

    GateReport {
        accepted,
        plan,
        total_meals,
        violating_meals,
        violation_ratio,
        threshold: max_violation_ratio,
        removed,
    }
}
