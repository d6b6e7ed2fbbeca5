//! Interactive console driving the agent.

use crate::agent::{truncate, Agent};
use crate::config::{self, AppConfig};
use crate::llm::InferenceClient;
use crate::mcp::McpClient;
use crate::tools::ToolContext;
use crate::types::AgentOutcome;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

/// Inputs that end the session (compared case-insensitively).
const EXIT_WORDS: &[&str] = &["exit", "quit", "退出"];

pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    EXIT_WORDS.iter().any(|w| *w == line)
}

/// Build an agent talking to the MCP server on `port`.
pub fn build_agent(config: &AppConfig, port: u16) -> Agent {
    let mcp = McpClient::new(
        &config.mcp_url(port),
        Duration::from_secs(config.mcp_timeout_secs),
    );
    let inference = InferenceClient::new(
        &config.llm_api_url,
        &config.llm_api_key,
        Duration::from_secs(config.llm_timeout_secs),
    );
    Agent::new(config, inference, ToolContext { mcp })
}

/// Answer a query, turning agent failures into text for the user.
pub async fn answer(agent: &Agent, query: &str) -> (String, Option<AgentOutcome>) {
    match agent.handle_query(query).await {
        Ok(outcome) => (outcome.answer.clone(), Some(outcome)),
        Err(e) => {
            error!("Query failed: {:#}", e);
            (format!("Error handling query: {:#}", e), None)
        }
    }
}

/// Render the step summary shown in verbose mode.
pub fn format_steps(outcome: &AgentOutcome) -> String {
    let mut out = String::new();
    for (i, step) in outcome.steps.iter().enumerate() {
        out.push_str(&format!("\nStep {}:\n", i + 1));
        out.push_str(&format!("  Tool:      {}\n", step.tool));
        out.push_str(&format!("  Arguments: {}\n", step.arguments));
        out.push_str(&format!("  Output:    {}\n", truncate(&step.output, 100)));
    }
    out
}

/// Run the console until an exit word or EOF.
pub async fn run_client(config: &AppConfig, port: u16, verbose: bool) -> Result<()> {
    config::require_client_secrets(config)?;
    let agent = build_agent(config, port);

    println!("{}", "=== MCP weather assistant ===".bold());
    println!("Connected to MCP server: {}", config.mcp_url(port));
    println!("Type 'exit' to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n{} ", "Your question:".cyan().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        if is_exit_command(&line) {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        if verbose {
            println!("\nQuery: {}", query);
            println!("{}", "=".repeat(50));
        }

        let (text, outcome) = answer(&agent, query).await;

        if verbose {
            if let Some(outcome) = &outcome {
                println!("{}", "=".repeat(50));
                println!("Agent finished, {} step(s):", outcome.steps.len());
                print!("{}", format_steps(outcome));
            }
        }

        println!("\n{}", text);
    }

    Ok(())
}
