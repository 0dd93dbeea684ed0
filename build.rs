//! Build script for NutriNudge
//!
//! Embeds a build number, UTC timestamp, cargo profile, and target triple.
//! CI can pin the number with NUTRINUDGE_BUILD_NUMBER; local builds count up
//! in build_number.txt.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn local_build_number() -> u64 {
    let counter = Path::new(COUNTER_FILE);
    let previous: u64 = fs::read_to_string(counter)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = previous + 1;

    // A read-only checkout still builds; the number just stops advancing
    if let Err(e) = fs::write(counter, next.to_string()) {
        println!("cargo:warning=Could not update {}: {}", COUNTER_FILE, e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=NUTRINUDGE_BUILD_NUMBER");

    let build_number = std::env::var("NUTRINUDGE_BUILD_NUMBER")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(local_build_number);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=NUTRINUDGE_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=NUTRINUDGE_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=NUTRINUDGE_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=NUTRINUDGE_BUILD_TARGET={}", target);
}
