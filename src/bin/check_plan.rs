//! Run the plan quality gate over plan and constraint JSON files
//!
//! Usage: check_plan <plan.json> [constraints.json]
//!
//! Prints the gate report as JSON. Exits with status 2 when the plan is
//! rejected and the fallback plan should be served instead.

use std::path::Path;

use nutrinudge::config::Config;
use nutrinudge::models::{Constraints, Plan};
use nutrinudge::validation::evaluate_with_threshold;
use tracing_subscriber::EnvFilter;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrinudge=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(plan_path) = args.first() else {
        eprintln!("Usage: check_plan <plan.json> [constraints.json]");
        std::process::exit(1);
    };

    let plan: Plan = read_json(Path::new(plan_path))?;
    let constraints: Constraints = match args.get(1) {
        Some(path) => read_json(Path::new(path))?,
        None => Constraints::default(),
    };
    constraints.check()?;

    let config = Config::from_env();
    let report = evaluate_with_threshold(&plan, &constraints, config.policy.max_violation_ratio);

    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!(
        "{}: {}/{} meals violate constraints ({:.1}%, limit {:.1}%)",
        if report.accepted { "ACCEPTED" } else { "REJECTED" },
        report.violating_meals,
        report.total_meals,
        report.violation_ratio * 100.0,
        report.threshold * 100.0
    );

    if !report.accepted {
        std::process::exit(2);
    }
    Ok(())
}
