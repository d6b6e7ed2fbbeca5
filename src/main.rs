//! weather-mcp — MCP weather server and agent client.
//!
//! Usage:
//!   weather-mcp server [--port N]                     Run the MCP server
//!   weather-mcp client [--port N] [-v] [-d]           Run the interactive agent
//!   weather-mcp launch [--server] [--client] [--port N]
//!                                                     Pick a port and run one or both

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use weather_mcp::config::{self, AppConfig};
use weather_mcp::launcher::{self, Role};
use weather_mcp::repl;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "weather-mcp")]
#[command(version = "0.1.0")]
#[command(about = "Weather queries through an LLM agent and a small MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file.
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level (debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server.
    Server {
        /// Port to listen on (defaults to the configured port, 8765).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the interactive agent client.
    Client {
        /// Port of the MCP server.
        #[arg(long)]
        port: Option<u16>,

        /// Print each agent step.
        #[arg(short, long)]
        verbose: bool,

        /// Enable debug logging.
        #[arg(short, long)]
        debug: bool,
    },

    /// Pick a free port and run the server, the client, or both.
    Launch {
        /// Only start the server.
        #[arg(long)]
        server: bool,

        /// Only start the client.
        #[arg(long)]
        client: bool,

        /// Preferred port (falls back to a free one when taken).
        #[arg(long)]
        port: Option<u16>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.command {
        Commands::Client { debug: true, .. } => "debug",
        _ => cli.log_level.as_str(),
    };

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = config::resolve_path(&cli.config);
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match cli.command {
        Commands::Server { port } => cmd_server(cfg, port).await,
        Commands::Client { port, verbose, .. } => cmd_client(cfg, port, verbose).await,
        Commands::Launch {
            server,
            client,
            port,
        } => launcher::launch(cfg, Role::from_flags(server, client), port).await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_server(cfg: AppConfig, port: Option<u16>) -> Result<()> {
    config::require_server_secrets(&cfg)?;
    let port = port.unwrap_or(cfg.port);

    println!(
        "{} Starting MCP server on port {}",
        ">>>".green().bold(),
        port
    );
    launcher::run_server_until_ctrl_c(&cfg, port).await
}

async fn cmd_client(cfg: AppConfig, port: Option<u16>, verbose: bool) -> Result<()> {
    let port = port.unwrap_or(cfg.port);
    repl::run_client(&cfg, port, verbose).await
}
