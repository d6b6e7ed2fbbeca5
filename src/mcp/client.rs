//! Client side of the protocol, used by the agent's remote tools.

use crate::mcp::{FunctionName, RequestEnvelope, ResponseEnvelope};
use crate::weather::WeatherResult;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{error, info};

/// Calls functions on an MCP server.
#[derive(Debug, Clone)]
pub struct McpClient {
    url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl McpClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call a remote function. Transport failures come back as a
    /// `Failure` envelope; this never returns an error.
    pub async fn call_function(
        &self,
        function: FunctionName,
        parameters: Map<String, Value>,
    ) -> ResponseEnvelope {
        let args = Value::Object(parameters.clone());
        info!("MCP call {} at {}: {}", function, self.url(), args);
        let request = RequestEnvelope::new(function, parameters);

        let resp = match self
            .http
            .post(&self.url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let message = if e.is_timeout() {
                    format!(
                        "request to MCP server timed out after {}s",
                        self.timeout.as_secs()
                    )
                } else {
                    format!("request to MCP server failed: {}", e)
                };
                error!("MCP call {} failed: {}", function, message);
                return ResponseEnvelope::failure(message);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            error!("MCP server error: {}", status);
            return ResponseEnvelope::failure_with_status(
                format!("MCP server error ({})", status),
                status.as_u16(),
            );
        }

        match resp.json::<ResponseEnvelope>().await {
            Ok(envelope) => {
                info!("MCP response for {} (success: {})", function, envelope.is_success());
                envelope
            }
            Err(e) => {
                error!("Malformed MCP response for {}: {}", function, e);
                ResponseEnvelope::failure(format!("malformed MCP response: {}", e))
            }
        }
    }

    /// Weather for `city` as text ready for the model.
    pub async fn get_weather(&self, city: &str) -> String {
        let mut params = Map::new();
        params.insert("city".into(), Value::String(city.to_string()));

        match self.call_function(FunctionName::GetWeather, params).await {
            ResponseEnvelope::Success { result } => {
                match serde_json::from_value::<WeatherResult>(Value::Object(result)) {
                    Ok(weather) => format_weather(&weather),
                    Err(e) => format!("Failed to get weather: malformed result: {}", e),
                }
            }
            ResponseEnvelope::Failure { error, .. } => {
                format!("Failed to get weather: {}", error)
            }
        }
    }
}

/// Multi-line weather summary.
pub fn format_weather(w: &WeatherResult) -> String {
    format!(
        "Weather in {}:\n\
         Temperature: {}°C, feels like {}°C\n\
         Conditions: {}\n\
         Humidity: {}%\n\
         Wind speed: {} m/s",
        w.city, w.temperature, w.feels_like, w.description, w.humidity, w.wind_speed
    )
}
