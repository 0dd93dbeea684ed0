//! Plan assembly
//!
//! The plan pipeline, the fallback generator, and the helpers that work on a
//! finished plan (swaps and grocery lists).

pub mod alternatives;
pub mod fallback;
pub mod grocery;
pub mod service;

pub use alternatives::safe_alternatives;
pub use fallback::{generate_fallback_plan, DietClass, FALLBACK_DAYS};
pub use grocery::{generate_grocery_list, GroceryCategory, GroceryItem, GroceryList};
pub use service::{
    FallbackReason, GenerationRequest, NoGenerator, PlanBrief, PlanGenerator, PlanOutcome,
    PlanService, DEFAULT_PLAN_DAYS, FALLBACK_NOTICE,
};
