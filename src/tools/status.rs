//! NutriNudge Status Tool
//!
//! Runtime status and usage instructions for the NutriNudge service.

use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::{Config, PolicyConfig};

/// Planning instructions for AI assistants
pub const PLANNING_INSTRUCTIONS: &str = r#"
# NutriNudge Planning Instructions

NutriNudge turns a user profile and a free-text daily routine into a weekly
meal plan that respects diet type, allergens, medical conditions, and
day-specific exclusions.

## Typical Workflow

1. `calculate_targets(profile)` - daily calories, macros, BMI
2. `parse_routine(routine)` - day-specific exclusions and preferred foods
3. `generate_plan(profile, routine, ...)` - full pipeline with the quality gate
4. `meal_alternatives(meal, day_index, constraints)` - swap a single meal
5. `grocery_list(plan)` - shopping list for the week

## Day Numbering

Plan day 1 is **monday**, day 2 is tuesday, and so on; day 8 wraps back to
monday. Day-specific exclusions are checked against this positional weekday,
not against the day label.

## Routine Phrases Understood Locally

- "no eggs on tuesday and thursday"
- "avoid nuts on monday", "skip meat on friday"
- "I don't eat fish on wednesday", "I can't eat onion on sunday"
- "exclude dairy from saturday", "rice is not allowed on monday"
- "I love dal", "include more vegetables", "my diet should include oats"

Long routines (over 50 characters) with no recognised exclusion phrase are
sent to the language model when one is configured.

## Constraint Sets

```
{
  "diet_type": "vegetarian",
  "allergens": ["dairy", "tree nuts"],
  "medical_conditions": ["diabetes"],
  "daily_exclusions": { "tuesday": ["egg"] }
}
```

- Known diet types with exclusions: vegan, vegetarian, pescatarian
- Known allergens: egg, peanut, tree nuts, dairy, gluten, soy, shellfish, fish
  (any other allergen is matched literally)
- Known conditions: diabetes, hypertension, pcos, lactose intolerance, thyroid
  (unknown conditions are ignored)
- Matching is substring-based over meal name and ingredients: "eggplant"
  matches "egg"

## Quality Gate

`evaluate_plan` validates every meal, removes violating meals, and rejects
the plan when more than 30% of meals violate constraints. A rejected plan
must be replaced with `fallback_plan`; tell the user a safe fallback plan is
being used.

## Quick Reference

| Task | Tool |
|------|------|
| Service status | `nudge_status` |
| Targets from profile | `calculate_targets` |
| Parse a routine | `parse_routine` |
| Check one meal | `validate_meal` |
| Gate a whole plan | `evaluate_plan` |
| Deterministic safe plan | `fallback_plan` |
| End-to-end plan | `generate_plan` |
| Swap a meal | `meal_alternatives` |
| Shopping list | `grocery_list` |
"#;

/// Runtime status of the NutriNudge service
#[derive(Debug, Clone, Serialize)]
pub struct NudgeStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Language model settings
    pub llm_enabled: bool,
    pub model: String,
    pub policy: PolicyConfig,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    llm_enabled: bool,
    model: String,
    policy: PolicyConfig,
}

impl StatusTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            start_time: Instant::now(),
            llm_enabled: config.llm_enabled(),
            model: config.llm.model.clone(),
            policy: config.policy,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> NudgeStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NudgeStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            llm_enabled: self.llm_enabled,
            model: self.model.clone(),
            policy: self.policy,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
