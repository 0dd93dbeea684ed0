//! Build metadata and the startup banner
//!
//! Values are embedded by build.rs; builds without it report zero/"unknown".

use serde::Serialize;

use crate::config::{DEFAULT_ESCALATION_MIN_CHARS, DEFAULT_MAX_VIOLATION_RATIO};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const BUILD_NUMBER: u64 = match option_env!("NUTRINUDGE_BUILD_NUMBER") {
    Some(s) => digits_or_zero(s),
    None => 0,
};

pub const BUILD_TIMESTAMP: &str = or_unknown(option_env!("NUTRINUDGE_BUILD_TIMESTAMP"));
pub const BUILD_PROFILE: &str = or_unknown(option_env!("NUTRINUDGE_BUILD_PROFILE"));
pub const BUILD_TARGET: &str = or_unknown(option_env!("NUTRINUDGE_BUILD_TARGET"));

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(s) => s,
        None => "unknown",
    }
}

/// Decimal digits as u64; anything else (including "") is 0
const fn digits_or_zero(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut value: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            return 0;
        }
        value = value * 10 + (bytes[i] - b'0') as u64;
        i += 1;
    }
    value
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
    pub target: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            profile: BUILD_PROFILE,
            target: BUILD_TARGET,
        }
    }

    /// Startup banner lines, including the compiled-in planning defaults
    pub fn banner(&self) -> Vec<String> {
        vec![
            format!("NutriNudge {} (build {}, {})", self.version, self.build_number, self.profile),
            format!("  compiled {} for {}", self.build_timestamp, self.target),
            format!(
                "  defaults: reject plans above {:.0}% violating meals, escalate routines over {} chars",
                DEFAULT_MAX_VIOLATION_RATIO * 100.0,
                DEFAULT_ESCALATION_MIN_CHARS
            ),
        ]
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner() {
        eprintln!("{}", line);
    }
}
