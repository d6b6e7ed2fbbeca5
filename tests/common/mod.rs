#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{extract::Query, extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use weather_mcp::{
    config::AppConfig,
    server::{self, FunctionRegistry, GetWeather},
    weather::{CityDirectory, WeatherClient},
};

pub type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serve `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn weather_payload(name: &str) -> Value {
    json!({
        "coord": {"lon": 116.4, "lat": 39.9},
        "name": name,
        "sys": {"country": "CN", "sunrise": 1, "sunset": 2},
        "main": {"temp": 21.5, "feels_like": 20.9, "humidity": 40, "pressure": 1012},
        "weather": [{"id": 800, "main": "Clear", "description": "晴", "icon": "01d"}],
        "wind": {"speed": 3.2, "deg": 180}
    })
}

#[derive(Clone)]
struct UpstreamState {
    accepted: Arc<HashSet<String>>,
    captured: Captured,
    delay: Duration,
}

/// Fake OpenWeatherMap. Queries whose `id` or `q` is in `accepted` succeed
/// and report that value as the city name; the rest get a 404.
pub async fn spawn_upstream(accepted: &[&str], delay: Duration) -> (String, Captured) {
    let captured: Captured = Arc::default();
    let state = UpstreamState {
        accepted: Arc::new(accepted.iter().map(|s| s.to_string()).collect()),
        captured: captured.clone(),
        delay,
    };

    let router = Router::new()
        .route("/data/2.5/weather", get(upstream_weather))
        .with_state(state);
    let addr = spawn(router).await;
    (format!("http://{addr}/data/2.5/weather"), captured)
}

async fn upstream_weather(
    State(state): State<UpstreamState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(params.clone());
    tokio::time::sleep(state.delay).await;

    let key = params.get("id").or_else(|| params.get("q")).cloned().unwrap_or_default();
    if state.accepted.contains(&key) {
        let name = if key == "1816670" { "Beijing".to_string() } else { key };
        (StatusCode::OK, Json(weather_payload(&name)))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        )
    }
}

/// Config pointing at a fake upstream.
pub fn config(weather_api_url: &str) -> AppConfig {
    AppConfig {
        weather_api_key: "test-key".into(),
        weather_api_url: weather_api_url.into(),
        llm_api_key: "sk-test".into(),
        weather_timeout_secs: 1,
        mcp_timeout_secs: 2,
        llm_timeout_secs: 2,
        ..AppConfig::default()
    }
}

/// Start an MCP server; returns its `/v1/mcp` URL.
pub async fn spawn_mcp_server(registry: FunctionRegistry) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    tokio::spawn(async move {
        server::serve(listener, Arc::new(registry), cancel).await.unwrap();
    });
    format!("http://{addr}/v1/mcp")
}

/// MCP server whose weather client uses `cities` and a fake upstream.
pub async fn spawn_mcp_with_cities(upstream_url: &str, cities: CityDirectory) -> String {
    let client = WeatherClient::new(upstream_url, "test-key", "zh_cn", Duration::from_secs(1))
        .with_cities(cities);
    spawn_mcp_server(FunctionRegistry::new().register(GetWeather::new(client))).await
}

/// MCP server with the built-in registry over a fake upstream.
pub async fn spawn_mcp(upstream_url: &str) -> String {
    spawn_mcp_server(FunctionRegistry::from_config(&config(upstream_url))).await
}
