//! Layered system prompt builder.
//!
//! Layers (in order):
//! 1. Role
//! 2. Function catalog (from the tool definitions)
//! 3. Working method

use crate::tools::ToolDefinition;
use tracing::debug;

const ROLE: &str = r#"
# Role

You are a capable assistant that talks to external systems through MCP,
a small function-call protocol. Use the functions below whenever a request
needs live data or a precise calculation; answer directly otherwise.
"#;

const METHOD: &str = r#"
# Method

When a request needs external data or a calculation:
1. Work out what the user actually needs.
2. Pick the matching function.
3. Extract or infer each parameter from the request.
4. Call the function and base your answer on its result.

Explain your reasoning briefly:

Reasoning: [how you understood the request and why a function is needed]
Function: [which function you chose and why]
Parameters: [how each parameter was derived from the request]

Supported units for unit_converter: km/m/cm (length), kg/g (mass), C/F (temperature).
If a function reports a failure, tell the user plainly what went wrong.
"#;

/// Build the complete system prompt for a query.
pub fn build_system_prompt(tools: &[ToolDefinition]) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(ROLE);
    prompt.push('\n');

    prompt.push_str("# Functions\n\n");
    for (i, tool) in tools.iter().enumerate() {
        prompt.push_str(&format!("{}. {}: {}\n", i + 1, tool.name, tool.description));
        for p in &tool.parameters {
            prompt.push_str(&format!("   - {}: {}\n", p.name, p.description));
        }
    }

    prompt.push_str(METHOD);

    debug!("System prompt: {} chars", prompt.len());
    prompt
}
