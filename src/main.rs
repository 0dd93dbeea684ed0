//! NutriNudge
//!
//! An MCP server for constraint-checked meal planning.

use nutrinudge::build_info;
use nutrinudge::config::Config;
use nutrinudge::mcp::NudgeService;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrinudge=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!(
        "Language model: {}",
        if config.llm_enabled() { config.llm.model.as_str() } else { "disabled (fallback plans only)" }
    );
    eprintln!("Max violation ratio: {:.2}", config.policy.max_violation_ratio);

    // Create the NutriNudge service
    let service = NudgeService::new(&config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
