pub mod convert;
pub mod descriptor;

pub use descriptor::{ParamType, ToolDefinition, ToolParameter};

use crate::mcp::McpClient;
use crate::types::ToolResult;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

pub const WEATHER_TOOL: &str = "get_weather";
pub const CONVERTER_TOOL: &str = "unit_converter";

// ---------------------------------------------------------------------------
// Tool definitions for the inference API
// ---------------------------------------------------------------------------

/// Build the list of tool definitions exposed to the inference model.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: WEATHER_TOOL.into(),
            description: "Get the current weather for a city, e.g. 北京, 上海, 广州.".into(),
            parameters: vec![ToolParameter::new(
                "city",
                ParamType::String,
                "City name, e.g. 北京, 上海, 广州",
            )],
        },
        ToolDefinition {
            name: CONVERTER_TOOL.into(),
            description: "Convert a value between units (km/m/cm, kg/g, C/F).".into(),
            parameters: vec![
                ToolParameter::new("value", ParamType::Number, "The value to convert"),
                ToolParameter::new(
                    "from_unit",
                    ParamType::String,
                    "Source unit: km, m, cm, kg, g, C or F",
                ),
                ToolParameter::new(
                    "to_unit",
                    ParamType::String,
                    "Target unit: km, m, cm, kg, g, C or F",
                ),
            ],
        },
    ]
}

// ---------------------------------------------------------------------------
// Typed invocations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct WeatherArgs {
    city: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ConversionArgs {
    value: f64,
    from_unit: String,
    to_unit: String,
}

/// A tool call the model asked for, with its arguments checked.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    WeatherQuery {
        city: String,
    },
    UnitConversion {
        value: f64,
        from_unit: String,
        to_unit: String,
    },
}

impl ToolInvocation {
    /// Parse a `(name, arguments)` pair from the model.
    pub fn parse(name: &str, args: &serde_json::Value) -> Result<Self> {
        match name {
            WEATHER_TOOL => {
                let a: WeatherArgs = serde_json::from_value(args.clone())
                    .with_context(|| format!("Invalid arguments for {}", name))?;
                Ok(Self::WeatherQuery { city: a.city })
            }
            CONVERTER_TOOL => {
                let a: ConversionArgs = serde_json::from_value(args.clone())
                    .with_context(|| format!("Invalid arguments for {}", name))?;
                Ok(Self::UnitConversion {
                    value: a.value,
                    from_unit: a.from_unit,
                    to_unit: a.to_unit,
                })
            }
            _ => Err(anyhow!("Unknown tool: {}", name)),
        }
    }

    /// Whether the call leaves the process.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::WeatherQuery { .. })
    }
}

// ---------------------------------------------------------------------------
// Tool execution engine
// ---------------------------------------------------------------------------

/// Handles tools need at execution time.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub mcp: McpClient,
}

/// Run a parsed invocation. Both tools report failures as text.
pub async fn run_invocation(ctx: &ToolContext, invocation: &ToolInvocation) -> String {
    match invocation {
        ToolInvocation::WeatherQuery { city } => ctx.mcp.get_weather(city).await,
        ToolInvocation::UnitConversion {
            value,
            from_unit,
            to_unit,
        } => convert::unit_converter(*value, from_unit, to_unit),
    }
}

/// Execute a tool call by name.
pub async fn execute_tool(ctx: &ToolContext, name: &str, args: &serde_json::Value) -> ToolResult {
    match ToolInvocation::parse(name, args) {
        Ok(invocation) => {
            debug!("Running {:?} (remote: {})", invocation, invocation.is_remote());
            ToolResult {
                tool_call_id: String::new(), // Set by caller
                output: run_invocation(ctx, &invocation).await,
                success: true,
            }
        }
        Err(e) => ToolResult {
            tool_call_id: String::new(),
            output: format!("Error: {:#}", e),
            success: false,
        },
    }
}
