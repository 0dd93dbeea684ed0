//! Routine interpretation with escalation
//!
//! The rule-based pass runs first. When the routine is long and the rules
//! found no day exclusions, the text is handed to an external interpreter.
//! Interpreter failures are logged and swallowed; callers always get a
//! result.

use std::sync::Arc;

use async_trait::async_trait;

use super::patterns::parse_locally;
use crate::config::PolicyConfig;
use crate::error::{NudgeError, NudgeResult};
use crate::models::RoutineInsights;

/// External text-to-JSON oracle for routines the patterns cannot read
#[async_trait]
pub trait RoutineInterpreter: Send + Sync {
    async fn interpret(&self, routine: &str) -> NudgeResult<RoutineInsights>;
}

#[async_trait]
impl<T: RoutineInterpreter + ?Sized> RoutineInterpreter for Arc<T> {
    async fn interpret(&self, routine: &str) -> NudgeResult<RoutineInsights> {
        (**self).interpret(routine).await
    }
}

/// Interpreter used when no LLM endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterpreter;

#[async_trait]
impl RoutineInterpreter for NoInterpreter {
    async fn interpret(&self, _routine: &str) -> NudgeResult<RoutineInsights> {
        Err(NudgeError::NotConfigured(
            "no routine interpreter available".to_string(),
        ))
    }
}

/// Routine parser: local patterns plus best-effort escalation
#[derive(Debug, Clone)]
pub struct RoutineParser<I> {
    interpreter: I,
    escalation_min_chars: usize,
}

impl<I: RoutineInterpreter> RoutineParser<I> {
    pub fn new(interpreter: I) -> Self {
        Self::with_policy(interpreter, &PolicyConfig::default())
    }

    pub fn with_policy(interpreter: I, policy: &PolicyConfig) -> Self {
        Self {
            interpreter,
            escalation_min_chars: policy.escalation_min_chars,
        }
    }

    /// Escalate only long routines where the rules found no day exclusions
    pub fn should_escalate(&self, routine: &str, local: &RoutineInsights) -> bool {
        routine.chars().count() > self.escalation_min_chars && local.exclusions.is_empty()
    }

    /// Parse a routine, escalating when the local pass is insufficient.
    ///
    /// Local exclusions are the base; interpreter exclusions replace them per
    /// day key. Preferred foods are unioned, local entries first.
    pub async fn parse(&self, routine: &str) -> RoutineInsights {
        let mut insights = parse_locally(routine);

        if !self.should_escalate(routine, &insights) {
            return insights;
        }

        tracing::debug!(
            "Escalating routine of {} chars to interpreter",
            routine.chars().count()
        );
        let external = self.parse_with_interpreter(routine).await;
        insights.exclusions.overlay(external.exclusions);
        insights.preferences.merge(external.preferences);
        insights
    }

    /// Ask the interpreter directly; any failure yields an empty result
    pub async fn parse_with_interpreter(&self, routine: &str) -> RoutineInsights {
        match self.interpreter.interpret(routine).await {
            Ok(insights) => RoutineInsights {
                exclusions: insights.exclusions.normalized(),
                preferences: insights.preferences,
            },
            Err(e) => {
                tracing::warn!("Routine interpretation failed, using local result: {}", e);
                RoutineInsights::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::{ExclusionMap, Weekday};

    /// Interpreter stub that counts calls and returns a canned answer
    struct StubInterpreter {
        calls: AtomicUsize,
        answer: Option<RoutineInsights>,
    }

    impl StubInterpreter {
        fn answering(answer: RoutineInsights) -> Self {
            Self { calls: AtomicUsize::new(0), answer: Some(answer) }
        }

        fn failing() -> Self {
            Self { calls: AtomicUsize::new(0), answer: None }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RoutineInterpreter for StubInterpreter {
        async fn interpret(&self, _routine: &str) -> NudgeResult<RoutineInsights> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .clone()
                .ok_or(NudgeError::UpstreamStatus { status: 500, body: "boom".to_string() })
        }
    }

    fn external_answer() -> RoutineInsights {
        let mut insights = RoutineInsights::default();
        insights.exclusions.insert(Weekday::Friday, "meat");
        insights.preferences.add_food("dal");
        insights
    }

    const LONG_UNPARSEABLE: &str =
        "On fasting days like the start of the week I keep away from anything with eggs in it";

    #[tokio::test]
    async fn test_short_text_never_escalates() {
        let stub = Arc::new(StubInterpreter::answering(external_answer()));
        let parser = RoutineParser::new(stub.clone());

        let insights = parser.parse("Mondays are fasting days for me").await;
        assert!(insights.exclusions.is_empty());

        parser.parse("No eggs on Tuesday").await;
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_long_text_with_local_matches_does_not_escalate() {
        let stub = Arc::new(StubInterpreter::answering(external_answer()));
        let parser = RoutineParser::new(stub.clone());

        let insights = parser
            .parse("I usually work from home, but please note: no eggs on Tuesday and Thursday")
            .await;

        assert_eq!(stub.calls(), 0);
        assert!(insights.exclusions.contains(Weekday::Thursday, "eggs"));
    }

    #[tokio::test]
    async fn test_long_text_without_matches_escalates_once() {
        let stub = Arc::new(StubInterpreter::answering(external_answer()));
        let parser = RoutineParser::new(stub.clone());

        let insights = parser.parse(LONG_UNPARSEABLE).await;

        assert_eq!(stub.calls(), 1);
        assert!(insights.exclusions.contains(Weekday::Friday, "meat"));
        assert_eq!(insights.preferences.preferred_foods, vec!["dal"]);
    }

    #[tokio::test]
    async fn test_interpreter_failure_degrades_to_local_result() {
        let stub = Arc::new(StubInterpreter::failing());
        let parser = RoutineParser::new(stub.clone());

        let insights = parser
            .parse("I love oats and I keep away from anything fried at the weekend, usually")
            .await;

        assert_eq!(stub.calls(), 1);
        assert!(insights.exclusions.is_empty());
        assert_eq!(insights.preferences.preferred_foods, vec!["oats"]);
    }

    #[tokio::test]
    async fn test_interpreter_output_is_normalized() {
        let raw: ExclusionMap = serde_json::from_value(serde_json::json!({
            "Wednesday": ["Chicken"],
            "weekend": ["cake"]
        }))
        .unwrap();
        let stub = StubInterpreter::answering(RoutineInsights {
            exclusions: raw,
            ..Default::default()
        });
        let parser = RoutineParser::new(stub);

        let insights = parser.parse_with_interpreter(LONG_UNPARSEABLE).await;

        assert!(insights.exclusions.contains(Weekday::Wednesday, "chicken"));
        assert_eq!(insights.exclusions.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_threshold() {
        let stub = Arc::new(StubInterpreter::answering(external_answer()));
        let policy = PolicyConfig { escalation_min_chars: 10, ..Default::default() };
        let parser = RoutineParser::with_policy(stub.clone(), &policy);

        parser.parse("I fast on some weekdays").await;
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_interpreter_is_harmless() {
        let parser = RoutineParser::new(NoInterpreter);
        let insights = parser.parse(LONG_UNPARSEABLE).await;
        assert!(insights.is_empty());
    }
}
