pub mod client;
pub mod envelope;

pub use client::{format_weather, McpClient};
pub use envelope::{FunctionName, RequestEnvelope, ResponseEnvelope, MCP_PATH};
