//! Validation result model

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Outcome of validating one meal
///
/// Violations keep the order in which constraints were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<String>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<String>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    pub fn valid() -> Self {
        Self::from_violations(Vec::new())
    }

    /// Append another result's violations after this one's
    pub fn extend(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
        self.is_valid = self.violations.is_empty();
    }
}
