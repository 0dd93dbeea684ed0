//! LLM collaborators
//!
//! OpenAI-compatible chat client plus the routine interpreter and plan
//! generator built on it.

pub mod client;
pub mod generator;
pub mod interpreter;

pub use client::{strip_code_fences, ChatClient, ChatMessage};
pub use generator::LlmPlanGenerator;
pub use interpreter::LlmRoutineInterpreter;
