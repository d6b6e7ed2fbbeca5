//! Static function table consulted by the router.

use crate::config::AppConfig;
use crate::mcp::{FunctionName, RequestEnvelope, ResponseEnvelope};
use crate::server::McpError;
use crate::weather::WeatherClient;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A function callable through the protocol.
#[async_trait]
pub trait McpFunction: Send + Sync {
    /// Name the function is dispatched under.
    fn name(&self) -> FunctionName;

    /// Run the function. Failures are returned in-band.
    async fn call(&self, params: &Map<String, Value>) -> ResponseEnvelope;
}

/// `get_weather`, backed by OpenWeatherMap.
pub struct GetWeather {
    client: WeatherClient,
}

impl GetWeather {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl McpFunction for GetWeather {
    fn name(&self) -> FunctionName {
        FunctionName::GetWeather
    }

    async fn call(&self, params: &Map<String, Value>) -> ResponseEnvelope {
        self.client.get_weather(params).await
    }
}

/// Name → function table, built once at startup and read-only afterwards.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<FunctionName, Arc<dyn McpFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in function wired to `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().register(GetWeather::new(WeatherClient::from_config(config)))
    }

    pub fn register(mut self, function: impl McpFunction + 'static) -> Self {
        self.functions.insert(function.name(), Arc::new(function));
        self
    }

    pub fn names(&self) -> Vec<FunctionName> {
        self.functions.keys().copied().collect()
    }

    /// Route a validated envelope to its function.
    pub async fn dispatch(&self, request: RequestEnvelope) -> Result<ResponseEnvelope, McpError> {
        let function = request
            .function_name
            .parse::<FunctionName>()
            .ok()
            .and_then(|name| self.functions.get(&name))
            .ok_or_else(|| McpError::NotFound(request.function_name.clone()))?;

        let args = Value::Object(request.parameters.clone());
        info!("MCP call: {}({})", request.function_name, args);
        Ok(function.call(&request.parameters).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl McpFunction for Echo {
        fn name(&self) -> FunctionName {
            FunctionName::GetWeather
        }

        async fn call(&self, params: &Map<String, Value>) -> ResponseEnvelope {
            ResponseEnvelope::Success {
                result: params.clone(),
            }
        }
    }

    fn request(name: &str, params: Value) -> RequestEnvelope {
        let Value::Object(parameters) = params else {
            panic!("parameters must be an object");
        };
        RequestEnvelope {
            function_name: name.into(),
            parameters,
        }
    }

    #[tokio::test]
    async fn dispatches_registered_function() {
        let registry = FunctionRegistry::new().register(Echo);
        let resp = registry
            .dispatch(request("get_weather", json!({"city": "北京"})))
            .await
            .unwrap();

        let Value::Object(expected) = json!({"city": "北京"}) else {
            unreachable!()
        };
        assert_eq!(resp, ResponseEnvelope::Success { result: expected });
    }

    #[tokio::test]
    async fn unknown_name_is_not_found() {
        let registry = FunctionRegistry::new().register(Echo);
        let err = registry
            .dispatch(request("unknown_fn", json!({})))
            .await
            .unwrap_err();
        assert_eq!(err, McpError::NotFound("unknown_fn".into()));
    }

    #[tokio::test]
    async fn known_but_unregistered_name_is_not_found() {
        let registry = FunctionRegistry::new();
        assert!(registry.names().is_empty());
        let err = registry
            .dispatch(request("get_weather", json!({"city": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::NotFound(_)));
    }
}
