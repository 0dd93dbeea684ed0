//! Plan pipeline
//!
//! Constraints, routine parsing, one generator call, the quality gate, and
//! the fallback branch. Generator failures and gate rejections degrade to the
//! fallback plan; only malformed input is returned as an error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use super::fallback::generate_fallback_plan;
use crate::config::PolicyConfig;
use crate::error::{NudgeError, NudgeResult};
use crate::models::{Constraints, ExclusionMap, Macros, Plan, Preferences, RoutineInsights, UserProfile};
use crate::routine::{RoutineInterpreter, RoutineParser};
use crate::validation::{evaluate_with_threshold, GateReport};

/// Plan length when the caller does not ask for one
pub const DEFAULT_PLAN_DAYS: usize = 7;

pub const FALLBACK_NOTICE: &str =
    "Using a safe fallback plan. The generated plan was unavailable or did not meet your dietary constraints.";

/// Everything the generator needs to write a plan
#[derive(Debug, Clone)]
pub struct PlanBrief {
    pub profile: UserProfile,
    pub target_calories: f64,
    pub macros: Macros,
    pub days: usize,
    pub constraints: Constraints,
    pub preferences: Preferences,
}

/// External plan writer
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, brief: &PlanBrief) -> NudgeResult<Plan>;
}

#[async_trait]
impl<T: PlanGenerator + ?Sized> PlanGenerator for Arc<T> {
    async fn generate(&self, brief: &PlanBrief) -> NudgeResult<Plan> {
        (**self).generate(brief).await
    }
}

/// Generator used when no LLM endpoint is configured; every request falls back
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGenerator;

#[async_trait]
impl PlanGenerator for NoGenerator {
    async fn generate(&self, _brief: &PlanBrief) -> NudgeResult<Plan> {
        Err(NudgeError::NotConfigured("no plan generator available".to_string()))
    }
}

/// Plan request
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct GenerationRequest {
    pub profile: UserProfile,
    /// Daily calorie target; computed from the profile when omitted
    #[serde(default)]
    pub target_calories: Option<f64>,
    /// Daily macro target; computed from the profile when omitted
    #[serde(default)]
    pub macros: Option<Macros>,
    #[serde(default)]
    pub days: Option<usize>,
    /// Free-text daily routine
    #[serde(default)]
    pub routine: Option<String>,
    /// Explicit per-day exclusions, merged with anything parsed from the routine
    #[serde(default)]
    pub daily_exclusions: ExclusionMap,
}

impl GenerationRequest {
    /// Profile constraints plus explicit daily exclusions
    pub fn constraints(&self) -> Constraints {
        Constraints {
            daily_exclusions: self.daily_exclusions.clone(),
            ..self.profile.constraints()
        }
    }

    pub fn days(&self) -> usize {
        self.days.filter(|d| *d > 0).unwrap_or(DEFAULT_PLAN_DAYS)
    }

    /// Explicit targets win; missing ones come from the profile
    pub fn targets(&self) -> NudgeResult<(f64, Macros)> {
        match (self.target_calories, self.macros) {
            (Some(calories), Some(macros)) => Ok((calories, macros)),
            (calories, macros) => {
                let computed = self.profile.targets()?;
                Ok((
                    calories.unwrap_or(computed.target_calories),
                    macros.unwrap_or(computed.macros),
                ))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    GeneratorFailed,
    QualityGateRejected,
}

/// Pipeline result; `fallback` tells the caller to show the notice
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_error: Option<String>,
    /// Gate verdict; its `plan` is moved into `plan` above
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<GateReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub constraints: Constraints,
    pub insights: RoutineInsights,
    pub generated_at: DateTime<Utc>,
}

/// Plan pipeline over a generator and a routine interpreter
pub struct PlanService<G, I> {
    generator: G,
    parser: RoutineParser<I>,
    policy: PolicyConfig,
}

impl<G: PlanGenerator, I: RoutineInterpreter> PlanService<G, I> {
    pub fn new(generator: G, interpreter: I, policy: PolicyConfig) -> Self {
        Self {
            generator,
            parser: RoutineParser::with_policy(interpreter, &policy),
            policy,
        }
    }

    pub fn parser(&self) -> &RoutineParser<I> {
        &self.parser
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Run the full pipeline for one request
    pub async fn generate(&self, request: &GenerationRequest) -> NudgeResult<PlanOutcome> {
        let mut constraints = request.constraints();
        constraints.check()?;
        let (target_calories, macros) = request.targets()?;

        let insights = match request.routine.as_deref().filter(|r| !r.trim().is_empty()) {
            Some(routine) => self.parser.parse(routine).await,
            None => RoutineInsights::default(),
        };
        constraints.daily_exclusions.union(&insights.exclusions);

        let brief = PlanBrief {
            profile: request.profile.clone(),
            target_calories,
            macros,
            days: request.days(),
            constraints: constraints.clone(),
            preferences: insights.preferences.clone(),
        };

        let candidate = match self.generator.generate(&brief).await {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("Plan generation failed, using fallback: {}", e);
                return Ok(PlanOutcome {
                    plan: fallback_for(&brief),
                    fallback: true,
                    fallback_reason: Some(FallbackReason::GeneratorFailed),
                    generator_error: Some(e.to_string()),
                    report: None,
                    notice: Some(FALLBACK_NOTICE.to_string()),
                    constraints,
                    insights,
                    generated_at: Utc::now(),
                });
            }
        };

        let mut report = evaluate_with_threshold(&candidate, &constraints, self.policy.max_violation_ratio);

        let outcome = match report.plan.take() {
            Some(plan) => {
                tracing::info!("Serving generated plan with {} meals", plan.meal_count());
                PlanOutcome {
                    plan,
                    fallback: false,
                    fallback_reason: None,
                    generator_error: None,
                    report: Some(report),
                    notice: None,
                    constraints,
                    insights,
                    generated_at: Utc::now(),
                }
            }
            None => PlanOutcome {
                plan: fallback_for(&brief),
                fallback: true,
                fallback_reason: Some(FallbackReason::QualityGateRejected),
                generator_error: None,
                report: Some(report),
                notice: Some(FALLBACK_NOTICE.to_string()),
                constraints,
                insights,
                generated_at: Utc::now(),
            },
        };

        Ok(outcome)
    }
}

fn fallback_for(brief: &PlanBrief) -> Plan {
    generate_fallback_plan(
        brief.target_calories,
        &brief.macros,
        &brief.profile.diet_preference,
        Some(&brief.profile),
    )
}
