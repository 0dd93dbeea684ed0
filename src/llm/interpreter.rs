//! LLM-backed routine interpreter

use async_trait::async_trait;

use super::client::{strip_code_fences, ChatClient, ChatMessage};
use crate::error::NudgeResult;
use crate::models::RoutineInsights;
use crate::routine::RoutineInterpreter;

const TEMPERATURE: f32 = 0.3;

/// Sends routines the local patterns could not read to the chat model
pub struct LlmRoutineInterpreter {
    client: ChatClient,
}

impl LlmRoutineInterpreter {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoutineInterpreter for LlmRoutineInterpreter {
    async fn interpret(&self, routine: &str) -> NudgeResult<RoutineInsights> {
        let messages = [ChatMessage::user(routine_prompt(routine))];
        let content = self.client.complete(&messages, TEMPERATURE, None).await?;
        parse_insights(&content)
    }
}

pub(crate) fn routine_prompt(routine: &str) -> String {
    format!(
        r#"Parse this dietary routine into structured JSON. Extract ONLY the exclusions and preferences mentioned.

User routine: "{}"

Required output format (return ONLY valid JSON, no markdown):
{{
  "exclusions": {{ "monday": ["egg"], "thursday": ["egg"] }},
  "preferences": {{ "preferredFoods": ["dal", "rice"], "mealFrequency": {{}} }}
}}

Rules:
- Days should be lowercase (monday, tuesday, etc.)
- Foods should be singular and lowercase
- If no exclusions mentioned, return empty object for exclusions
- If no preferences mentioned, return empty array for preferredFoods"#,
        routine.trim()
    )
}

/// Parse the model's reply; the caller normalises day keys
pub(crate) fn parse_insights(content: &str) -> NudgeResult<RoutineInsights> {
    Ok(serde_json::from_str(strip_code_fences(content))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NudgeError;
    use crate::models::Weekday;

    #[test]
    fn test_prompt_embeds_routine() {
        let prompt = routine_prompt("  Fasting on Mondays  ");
        assert!(prompt.contains("User routine: \"Fasting on Mondays\""));
        assert!(prompt.contains("\"preferredFoods\""));
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "```json\n{\"exclusions\": {\"monday\": [\"egg\"]}, \"preferences\": {\"preferredFoods\": [\"dal\"]}}\n```";
        let insights = parse_insights(reply).unwrap();

        assert!(insights.exclusions.contains(Weekday::Monday, "egg"));
        assert_eq!(insights.preferences.preferred_foods, vec!["dal"]);
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(matches!(parse_insights("Sorry, I cannot help"), Err(NudgeError::Json(_))));
    }
}
