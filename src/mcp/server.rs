//! NutriNudge MCP Server Implementation
//!
//! Implements the MCP server with all NutriNudge tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::llm::{ChatClient, LlmPlanGenerator, LlmRoutineInterpreter};
use crate::models::{Constraints, Macros, Meal, Plan, UserProfile};
use crate::planning::{GenerationRequest, NoGenerator, PlanGenerator, PlanService};
use crate::routine::{NoInterpreter, RoutineInterpreter};
use crate::tools::plans;
use crate::tools::routine;
use crate::tools::status::StatusTracker;
use crate::tools::validation;

type DynPlanService = PlanService<Arc<dyn PlanGenerator>, Arc<dyn RoutineInterpreter>>;

/// NutriNudge MCP Service
#[derive(Clone)]
pub struct NudgeService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    planner: Arc<DynPlanService>,
    tool_router: ToolRouter<NudgeService>,
}

impl NudgeService {
    pub fn new(config: &Config) -> Self {
        let (generator, interpreter): (Arc<dyn PlanGenerator>, Arc<dyn RoutineInterpreter>) =
            match ChatClient::new(&config.llm) {
                Ok(client) => (
                    Arc::new(LlmPlanGenerator::new(client.clone())),
                    Arc::new(LlmRoutineInterpreter::new(client)),
                ),
                Err(e) => {
                    tracing::warn!("{}; plans will use the fallback generator", e);
                    (Arc::new(NoGenerator), Arc::new(NoInterpreter))
                }
            };

        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config))),
            planner: Arc::new(PlanService::new(generator, interpreter, config.policy)),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseRoutineParams {
    /// Free-text daily routine, e.g. "No eggs on Tuesday and Thursday"
    pub routine: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateMealParams {
    pub meal: Meal,
    /// Weekday name; takes precedence over day_index
    pub weekday: Option<String>,
    /// Zero-based plan day index (0 = monday, wraps every 7 days)
    pub day_index: Option<usize>,
    #[serde(default)]
    pub constraints: Constraints,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EvaluatePlanParams {
    pub plan: Plan,
    #[serde(default)]
    pub constraints: Constraints,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FallbackPlanParams {
    /// Profile used for missing targets and dairy swaps
    pub profile: Option<UserProfile>,
    pub target_calories: Option<f64>,
    pub macros: Option<Macros>,
    /// Diet type or cuisine; defaults to the profile's
    pub diet_preference: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateTargetsParams {
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealAlternativesParams {
    /// The meal being replaced; its type selects the catalogue
    pub meal: Meal,
    pub weekday: Option<String>,
    pub day_index: Option<usize>,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default = "default_alternatives_limit")]
    pub limit: usize,
}

fn default_alternatives_limit() -> usize {
    5
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GroceryListParams {
    pub plan: Plan,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NudgeService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriNudge service including build info, language model settings, gate policy, and process information")]
    async fn nudge_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for building meal plans. Call this when starting a planning session or when unsure how to use the planning tools.")]
    fn planning_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PLANNING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PLANNING_INSTRUCTIONS)]))
    }

    // --- Routine ---

    #[tool(description = "Extract day-specific food exclusions and preferred foods from a free-text daily routine")]
    async fn parse_routine(&self, Parameters(p): Parameters<ParseRoutineParams>) -> Result<CallToolResult, McpError> {
        let result = routine::parse_routine(self.planner.parser(), &p.routine)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Validation ---

    #[tool(description = "Check one meal against diet type, allergens, medical conditions, and the exclusions for its weekday")]
    fn validate_meal(&self, Parameters(p): Parameters<ValidateMealParams>) -> Result<CallToolResult, McpError> {
        let weekday = validation::resolve_weekday(p.weekday.as_deref(), p.day_index)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = validation::validate_meal(&p.meal, weekday, &p.constraints)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Run the quality gate over a plan: drop violating meals and reject the plan when too many meals violate constraints. A rejected plan must be replaced with fallback_plan.")]
    fn evaluate_plan(&self, Parameters(p): Parameters<EvaluatePlanParams>) -> Result<CallToolResult, McpError> {
        let result = validation::evaluate_plan(&p.plan, &p.constraints, self.planner.policy())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Plans ---

    #[tool(description = "Build the deterministic 7-day safe fallback plan for a diet preference. Targets are computed from the profile when omitted.")]
    fn fallback_plan(&self, Parameters(p): Parameters<FallbackPlanParams>) -> Result<CallToolResult, McpError> {
        let result = plans::fallback_plan(p.profile.as_ref(), p.target_calories, p.macros, p.diet_preference.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Generate a meal plan end to end: parse the routine, ask the language model for a plan, gate it, and fall back to the safe plan when needed. Show the notice to the user when fallback is true.")]
    async fn generate_plan(&self, Parameters(p): Parameters<GenerationRequest>) -> Result<CallToolResult, McpError> {
        let result = plans::generate_plan(&self.planner, &p)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Calculate BMR, TDEE, daily calorie target, macros, and BMI for a profile")]
    fn calculate_targets(&self, Parameters(p): Parameters<CalculateTargetsParams>) -> Result<CallToolResult, McpError> {
        let result = plans::calculate_targets(&p.profile).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Suggest safe replacements for one meal of a plan, ordered by calorie closeness")]
    fn meal_alternatives(&self, Parameters(p): Parameters<MealAlternativesParams>) -> Result<CallToolResult, McpError> {
        let weekday = validation::resolve_weekday(p.weekday.as_deref(), p.day_index)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = plans::meal_alternatives(&p.meal, weekday, &p.constraints, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Build a categorized grocery list from every ingredient in a plan")]
    fn grocery_list(&self, Parameters(p): Parameters<GroceryListParams>) -> Result<CallToolResult, McpError> {
        let result = plans::grocery_list(&p.plan).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for NudgeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrinudge".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("NutriNudge".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NutriNudge - constraint-checked meal planning. \
                 IMPORTANT: Call planning_instructions before building a plan. \
                 Targets: calculate_targets. Routines: parse_routine. \
                 Validation: validate_meal, evaluate_plan (rejects plans with more than 30% violating meals). \
                 Plans: generate_plan (full pipeline), fallback_plan (deterministic safe plan). \
                 After planning: meal_alternatives, grocery_list. Status: nudge_status. \
                 Plan day 1 is monday; day-specific exclusions follow plan position."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info() {
        let service = NudgeService::new(&Config::default());
        let info = service.get_info();

        assert_eq!(info.server_info.name, "nutrinudge");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_alternatives_limit_defaults() {
        let params: MealAlternativesParams = serde_json::from_value(serde_json::json!({
            "meal": { "type": "snack", "name": "Apple" },
            "day_index": 2
        }))
        .unwrap();

        assert_eq!(params.limit, 5);
        assert!(params.constraints.is_empty());
    }
}
