//! Routine MCP Tools
//!
//! Tools for turning free-text routines into exclusions and preferences.

use serde::Serialize;

use crate::models::{ExclusionMap, Preferences};
use crate::routine::{parse_locally, RoutineInterpreter, RoutineParser};

/// Response for parse_routine
#[derive(Debug, Serialize)]
pub struct ParseRoutineResponse {
    pub exclusions: ExclusionMap,
    pub preferences: Preferences,
    /// Total (day, food) exclusion pairs
    pub exclusion_count: usize,
    /// Whether the text qualified for the language model
    pub escalated: bool,
}

/// Parse a routine with local patterns, escalating when warranted
pub async fn parse_routine<I: RoutineInterpreter>(
    parser: &RoutineParser<I>,
    routine: &str,
) -> Result<ParseRoutineResponse, String> {
    if routine.trim().is_empty() {
        return Err("routine must not be empty".to_string());
    }

    let escalated = parser.should_escalate(routine, &parse_locally(routine));
    let insights = parser.parse(routine).await;

    Ok(ParseRoutineResponse {
        exclusion_count: insights.exclusions.len(),
        exclusions: insights.exclusions,
        preferences: insights.preferences,
        escalated,
    })
}
