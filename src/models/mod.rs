//! Data models
//!
//! Plans, meals, constraint sets, and parser results.

mod constraints;
mod meal;
mod plan;
mod profile;
mod routine;
mod validation;

pub use constraints::{Constraints, ExclusionMap, Weekday};
pub use meal::{Macros, Meal, MealType};
pub use plan::{Day, Plan, PlanSummary};
pub use profile::UserProfile;
pub use routine::{Preferences, RoutineInsights};
pub use validation::ValidationResult;
