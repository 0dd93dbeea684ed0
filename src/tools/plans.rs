//! Plan MCP Tools
//!
//! Tools for producing plans and working with a finished plan.

use serde::Serialize;

use crate::models::{Constraints, Macros, Meal, Plan, UserProfile, Weekday};
use crate::nutrition::NutritionTargets;
use crate::planning::{
    self, GenerationRequest, GroceryList, PlanGenerator, PlanOutcome, PlanService,
};
use crate::routine::RoutineInterpreter;

/// Response for fallback_plan
#[derive(Debug, Serialize)]
pub struct FallbackPlanResponse {
    pub plan: Plan,
    pub meal_count: usize,
    pub diet_preference: String,
}

/// Response for meal_alternatives
#[derive(Debug, Serialize)]
pub struct MealAlternativesResponse {
    pub replacing: String,
    pub weekday: Weekday,
    pub alternatives: Vec<Meal>,
}

/// Response for grocery_list
#[derive(Debug, Serialize)]
pub struct GroceryListResponse {
    pub item_count: usize,
    pub list: GroceryList,
    pub text: String,
}

/// Calorie, macro, and BMI targets for a profile
pub fn calculate_targets(profile: &UserProfile) -> Result<NutritionTargets, String> {
    profile.targets().map_err(|e| e.to_string())
}

/// Deterministic safe plan.
///
/// Explicit targets win; missing ones are computed from the profile. The diet
/// preference defaults to the profile's.
pub fn fallback_plan(
    profile: Option<&UserProfile>,
    target_calories: Option<f64>,
    macros: Option<Macros>,
    diet_preference: Option<&str>,
) -> Result<FallbackPlanResponse, String> {
    let (target_calories, macros) = match (target_calories, macros, profile) {
        (Some(calories), Some(macros), _) => (calories, macros),
        (calories, macros, Some(profile)) => {
            let targets = calculate_targets(profile)?;
            (
                calories.unwrap_or(targets.target_calories),
                macros.unwrap_or(targets.macros),
            )
        }
        (_, _, None) => {
            return Err("target_calories and macros are required without a profile".to_string())
        }
    };
    if !(target_calories > 0.0) {
        return Err("target_calories must be positive".to_string());
    }

    let diet_preference = diet_preference
        .or(profile.map(|p| p.diet_preference.as_str()))
        .unwrap_or_default()
        .to_string();

    let plan = planning::generate_fallback_plan(target_calories, &macros, &diet_preference, profile);

    Ok(FallbackPlanResponse {
        meal_count: plan.meal_count(),
        plan,
        diet_preference,
    })
}

/// Run the full generate, gate, fallback pipeline
pub async fn generate_plan<G: PlanGenerator, I: RoutineInterpreter>(
    service: &PlanService<G, I>,
    request: &GenerationRequest,
) -> Result<PlanOutcome, String> {
    service.generate(request).await.map_err(|e| e.to_string())
}

/// Safe swaps for a single meal
pub fn meal_alternatives(
    meal: &Meal,
    weekday: Weekday,
    constraints: &Constraints,
    limit: usize,
) -> Result<MealAlternativesResponse, String> {
    constraints.check().map_err(|e| e.to_string())?;

    Ok(MealAlternativesResponse {
        replacing: meal.name.clone(),
        weekday,
        alternatives: planning::safe_alternatives(meal, weekday, constraints, limit),
    })
}

/// Shopping list for a plan, structured and as plain text
pub fn grocery_list(plan: &Plan) -> Result<GroceryListResponse, String> {
    let list = planning::generate_grocery_list(plan);

    Ok(GroceryListResponse {
        item_count: list.categories.values().map(Vec::len).sum(),
        text: list.to_text(),
        list,
    })
}
