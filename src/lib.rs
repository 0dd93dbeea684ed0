//! NutriNudge Library
//!
//! Diet plan constraint engine: routine parsing, meal validation, the plan
//! quality gate, and the safe fallback plan.

pub mod build_info;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod planning;
pub mod routine;
pub mod tools;
pub mod validation;

pub use error::{NudgeError, NudgeResult};
