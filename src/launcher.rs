//! Port selection and role orchestration for the combined launcher.

use crate::config::{self, AppConfig};
use crate::{repl, server};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Port used when none is requested.
pub const DEFAULT_PORT: u16 = 8765;

/// First port probed by `find_available_port`.
pub const SCAN_START: u16 = 8700;

/// Number of ports probed by `find_available_port`.
pub const SCAN_ATTEMPTS: u16 = 100;

/// Which processes the launcher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Server,
    Client,
    Both,
}

impl Role {
    /// `--server` wins over `--client`; neither means both.
    pub fn from_flags(server: bool, client: bool) -> Self {
        match (server, client) {
            (true, _) => Self::Server,
            (false, true) => Self::Client,
            (false, false) => Self::Both,
        }
    }
}

/// Whether `127.0.0.1:port` can be bound right now.
pub fn is_port_available(port: u16) -> bool {
    std::net::TcpListener::bind(("127.0.0.1", port)).is_ok()
}

/// First bindable port in `start..start + max_attempts`.
pub fn find_available_port(start: u16, max_attempts: u16) -> Result<u16> {
    let end = start.saturating_add(max_attempts);
    for port in start..end {
        if is_port_available(port) {
            return Ok(port);
        }
    }
    bail!(
        "No available port in range {}-{}",
        start,
        end.saturating_sub(1)
    );
}

/// Pick the port to use: the requested one if free, else the default if
/// free, else the first free port from the scan range.
pub fn resolve_port(requested: Option<u16>, default: u16) -> Result<u16> {
    let preferred = requested.unwrap_or(default);
    if is_port_available(preferred) {
        return Ok(preferred);
    }

    if requested.is_some() {
        warn!("Port {} is in use, selecting another", preferred);
    } else {
        warn!("Default port {} is in use, selecting another", preferred);
    }
    find_available_port(SCAN_START, SCAN_ATTEMPTS)
}

/// Run the selected role(s).
pub async fn launch(config: AppConfig, role: Role, requested_port: Option<u16>) -> Result<()> {
    config::require_server_secrets(&config)?;
    config::require_client_secrets(&config)?;

    let port = resolve_port(requested_port, config.port)?;
    println!("{} Using port {} for MCP", ">>>".green().bold(), port);

    match role {
        Role::Server => run_server_until_ctrl_c(&config, port).await,
        Role::Client => repl::run_client(&config, port, false).await,
        Role::Both => run_both(config, port).await,
    }
}

/// Standalone server that stops on Ctrl+C.
pub async fn run_server_until_ctrl_c(config: &AppConfig, port: u16) -> Result<()> {
    let listener = server::bind(&config.host, port).await?;
    let cancel = CancellationToken::new();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, stopping server");
        }
        signal_cancel.cancel();
    });

    server::run_server(config, listener, cancel).await
}

/// Server in the background, console in the foreground.
async fn run_both(config: AppConfig, port: u16) -> Result<()> {
    // Bound before the console starts, so the first query cannot race the server.
    let listener = server::bind(&config.host, port).await?;
    let cancel = CancellationToken::new();

    let server_config = config.clone();
    let server_cancel = cancel.clone();
    let server_handle = tokio::spawn(async move {
        server::run_server(&server_config, listener, server_cancel).await
    });

    let client_result = repl::run_client(&config, port, false).await;

    cancel.cancel();
    let shutdown_timeout = tokio::time::Duration::from_secs(10);
    match tokio::time::timeout(shutdown_timeout, server_handle).await {
        Ok(joined) => joined.context("Server task panicked")??,
        Err(_) => warn!("Server did not stop within {:?}", shutdown_timeout),
    }

    client_result
}
