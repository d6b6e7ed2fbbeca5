//! Tool-calling agent loop: Think → Act → Observe, per user query.
//!
//! For each query the agent:
//! 1. Sends the system prompt, the query and any prior turns to the model
//! 2. Executes the tool calls the model asked for
//! 3. Feeds the outputs back as tool messages
//! 4. Stops when the model answers without calling a tool

use crate::agent::system_prompt;
use crate::config::AppConfig;
use crate::llm::InferenceClient;
use crate::tools::{self, ToolContext, ToolDefinition};
use crate::types::*;
use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

/// Answer given when the model keeps calling tools past the turn limit.
pub const TURN_LIMIT_ANSWER: &str =
    "Sorry, I could not finish answering within the allowed number of steps.";

/// Answer given when the model replies with neither text nor tool calls.
pub const EMPTY_REPLY_ANSWER: &str = "Sorry, I could not come up with an answer to that.";

/// Answers user queries with the registered tools.
#[derive(Debug, Clone)]
pub struct Agent {
    inference: InferenceClient,
    tool_ctx: ToolContext,
    tool_defs: Vec<ToolDefinition>,
    model: String,
    max_tokens: u32,
    max_turns: u32,
}

impl Agent {
    pub fn new(config: &AppConfig, inference: InferenceClient, tool_ctx: ToolContext) -> Self {
        Self {
            inference,
            tool_ctx,
            tool_defs: tools::tool_definitions(),
            model: config.llm_model.clone(),
            max_tokens: config.max_tokens_per_turn,
            max_turns: config.max_agent_turns.max(1),
        }
    }

    /// Run one query to completion.
    ///
    /// Tool failures are fed back to the model; only inference failures
    /// return `Err`.
    pub async fn handle_query(&self, query: &str) -> Result<AgentOutcome> {
        let id = ulid::Ulid::new().to_string();
        info!("[{}] Query: {}", id, query);

        let mut messages = vec![
            ChatMessage::system(system_prompt::build_system_prompt(&self.tool_defs)),
            ChatMessage::user(query),
        ];
        let mut steps = Vec::new();
        let mut usage = TokenUsage::default();

        for turn in 1..=self.max_turns {
            let response = self
                .inference
                .chat(&self.model, &messages, &self.tool_defs, self.max_tokens)
                .await?;

            usage.prompt_tokens += response.usage.prompt_tokens;
            usage.completion_tokens += response.usage.completion_tokens;
            usage.total_tokens += response.usage.total_tokens;

            if response.tool_calls.is_empty() {
                let answer = response.content.unwrap_or_else(|| {
                    warn!("[{}] Model returned an empty reply", id);
                    EMPTY_REPLY_ANSWER.to_string()
                });
                info!("[{}] Answered after {} turn(s), {} step(s)", id, turn, steps.len());
                return Ok(AgentOutcome {
                    id,
                    answer,
                    steps,
                    usage,
                });
            }

            if let Some(ref content) = response.content {
                info!("[{}][Turn {}] Agent: {}", id, turn, truncate(content, 200));
            }
            messages.push(ChatMessage::assistant(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            for tc in &response.tool_calls {
                info!("[{}][Turn {}] Tool: {}({})", id, turn, tc.name, tc.arguments);

                let mut result = tools::execute_tool(&self.tool_ctx, &tc.name, &tc.arguments).await;
                result.tool_call_id = tc.id.clone();

                if result.success {
                    info!("[{}][Turn {}] Tool result: {}", id, turn, truncate(&result.output, 100));
                } else {
                    warn!("[{}][Turn {}] Tool error: {}", id, turn, result.output);
                }

                messages.push(ChatMessage::tool(&result.tool_call_id, result.output.clone()));
                steps.push(AgentStep {
                    tool: tc.name.clone(),
                    arguments: tc.arguments.clone(),
                    output: result.output,
                    success: result.success,
                    created_at: Utc::now(),
                });
            }
        }

        warn!("[{}] Turn limit ({}) reached", id, self.max_turns);
        Ok(AgentOutcome {
            id,
            answer: TURN_LIMIT_ANSWER.to_string(),
            steps,
            usage,
        })
    }
}

/// Truncate to at most `max` characters, appending `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("北京天气晴", 2), "北京...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }
}
