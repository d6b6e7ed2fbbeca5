//! Wire envelopes of the function-call protocol.
//!
//! Requests carry a function name and a parameter object; responses carry
//! either a `result` object or an `error` string with an optional upstream
//! status code. Application failures travel in-band inside a 200 response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Path the server mounts the protocol under.
pub const MCP_PATH: &str = "/v1/mcp";

/// Functions the server knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    GetWeather,
}

impl FunctionName {
    pub const ALL: &'static [FunctionName] = &[FunctionName::GetWeather];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetWeather => "get_weather",
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// `{"function_name": ..., "parameters": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub function_name: String,
    pub parameters: Map<String, Value>,
}

impl RequestEnvelope {
    pub fn new(function: FunctionName, parameters: Map<String, Value>) -> Self {
        Self {
            function_name: function.as_str().to_string(),
            parameters,
        }
    }

    /// Validate a raw JSON body into an envelope.
    ///
    /// Missing fields and wrong field types are reported with a message
    /// suitable for the 400 response body.
    pub fn from_json(body: &[u8]) -> Result<Self, String> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| format!("request body is not valid JSON: {}", e))?;

        let Value::Object(mut obj) = value else {
            return Err("request body must be a JSON object".into());
        };

        let (Some(name), Some(params)) = (obj.remove("function_name"), obj.remove("parameters"))
        else {
            return Err("malformed request: missing function_name or parameters".into());
        };

        let Value::String(function_name) = name else {
            return Err("function_name must be a string".into());
        };
        let Value::Object(parameters) = params else {
            return Err("parameters must be a JSON object".into());
        };

        Ok(Self {
            function_name,
            parameters,
        })
    }
}

/// `{"result": {...}}` or `{"error": "...", "status_code"?: n}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success {
        result: Map<String, Value>,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },
}

impl ResponseEnvelope {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            status_code: None,
        }
    }

    pub fn failure_with_status(error: impl Into<String>, status_code: u16) -> Self {
        Self::Failure {
            error: error.into(),
            status_code: Some(status_code),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
