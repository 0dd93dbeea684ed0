//! Runtime configuration
//!
//! Read from environment variables at startup.

use serde::Serialize;

/// Plan Quality Gate threshold: reject plans with more than 30% violating meals
pub const DEFAULT_MAX_VIOLATION_RATIO: f64 = 0.30;

/// Routines longer than this many characters may be escalated
pub const DEFAULT_ESCALATION_MIN_CHARS: usize = 50;

pub const DEFAULT_API_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Decision thresholds for the gate and the routine parser
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyConfig {
    pub max_violation_ratio: f64,
    pub escalation_min_chars: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_violation_ratio: DEFAULT_MAX_VIOLATION_RATIO,
            escalation_min_chars: DEFAULT_ESCALATION_MIN_CHARS,
        }
    }
}

/// Chat-completions endpoint settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// None disables routine interpretation and plan generation
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub llm: LlmConfig,
    pub policy: PolicyConfig,
}

impl Config {
    /// Build configuration from `NUTRINUDGE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm = LlmConfig {
            api_key: non_empty("NUTRINUDGE_API_KEY"),
            base_url: non_empty("NUTRINUDGE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            model: non_empty("NUTRINUDGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };

        let policy = PolicyConfig {
            max_violation_ratio: parse_ratio(
                "NUTRINUDGE_MAX_VIOLATION_RATIO",
                non_empty("NUTRINUDGE_MAX_VIOLATION_RATIO"),
                DEFAULT_MAX_VIOLATION_RATIO,
            ),
            escalation_min_chars: parse_or_default(
                "NUTRINUDGE_ESCALATION_MIN_CHARS",
                non_empty("NUTRINUDGE_ESCALATION_MIN_CHARS"),
                DEFAULT_ESCALATION_MIN_CHARS,
            ),
        };

        Self { llm, policy }
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.api_key.is_some()
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}='{}', using default", key, value);
            default
        }),
    }
}

/// Finite ratio clamped to [0, 1]; NaN and infinities fall back to the default
fn parse_ratio(key: &str, raw: Option<String>, default: f64) -> f64 {
    let value: f64 = parse_or_default(key, raw.clone(), default);
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        tracing::warn!(
            "Ignoring unparseable {}='{}', using default",
            key,
            raw.unwrap_or_default()
        );
        default
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_preserve_policy_constants() {
        let config = config_from(&[]);
        assert_eq!(config.policy.max_violation_ratio, 0.30);
        assert_eq!(config.policy.escalation_min_chars, 50);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert!(!config.llm_enabled());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("NUTRINUDGE_API_KEY", "secret"),
            ("NUTRINUDGE_API_BASE_URL", "http://localhost:8080/v1/"),
            ("NUTRINUDGE_MAX_VIOLATION_RATIO", "0.25"),
            ("NUTRINUDGE_ESCALATION_MIN_CHARS", "80"),
        ]);
        assert!(config.llm_enabled());
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert_eq!(config.policy.max_violation_ratio, 0.25);
        assert_eq!(config.policy.escalation_min_chars, 80);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[
            ("NUTRINUDGE_MAX_VIOLATION_RATIO", "lots"),
            ("NUTRINUDGE_ESCALATION_MIN_CHARS", "-3"),
            ("NUTRINUDGE_API_KEY", "   "),
        ]);
        assert_eq!(config.policy, PolicyConfig::default());
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_non_finite_ratio_falls_back() {
        for raw in ["NaN", "inf", "-infinity"] {
            let config = config_from(&[("NUTRINUDGE_MAX_VIOLATION_RATIO", raw)]);
            assert_eq!(config.policy.max_violation_ratio, DEFAULT_MAX_VIOLATION_RATIO, "{}", raw);
        }
        let config = config_from(&[("NUTRINUDGE_MAX_VIOLATION_RATIO", "1.7")]);
        assert_eq!(config.policy.max_violation_ratio, 1.0);
    }
}
