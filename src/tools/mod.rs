//! NutriNudge Tools module
//!
//! MCP tool implementations. Each tool returns a serializable response or a
//! plain error string for the server to wrap.

pub mod plans;
pub mod routine;
pub mod status;
pub mod validation;
