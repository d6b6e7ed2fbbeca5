//! weather-mcp — a weather and unit-conversion agent over a small
//! JSON function-call protocol.
//!
//! The server exposes `get_weather` (backed by OpenWeatherMap) at
//! `POST /v1/mcp`; the client runs a tool-calling agent that reaches the
//! server for weather and converts units in-process.

pub mod agent;
pub mod config;
pub mod launcher;
pub mod llm;
pub mod mcp;
pub mod repl;
pub mod server;
pub mod tools;
pub mod types;
pub mod weather;
