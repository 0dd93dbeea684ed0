//! Routine parsing module
//!
//! Extracts day-scoped exclusions and preferred foods from free-text routines.

pub mod interpreter;
pub mod patterns;

pub use interpreter::{NoInterpreter, RoutineInterpreter, RoutineParser};
pub use patterns::{extract_preferences, parse_daily_exclusions, parse_locally};
