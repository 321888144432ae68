//! Employer Console - Terminal dashboard for AI onboarding agents
//!
//! Usage:
//!   employer-console [OPTIONS]
//!
//! Examples:
//!   employer-console --token $TOKEN
//!   employer-console --api-url https://platform.example/api
//!   employer-console --config ./console.toml --log-level debug

use anyhow::{Context, Result};
use clap::Parser;
use employer_console::{ConsoleConfig, HttpAgentApi, Session, TuiApp};
use secrecy::SecretString;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Console CLI arguments
#[derive(Parser)]
#[command(name = "employer-console")]
#[command(about = "Manage the AI agents that onboard your new hires")]
#[command(version)]
struct Args {
    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Platform API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Session bearer token
    #[arg(long, env = "EMPLOYER_CONSOLE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Input poll interval in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<ConsoleConfig> {
    let mut config = match &args.config {
        Some(path) => ConsoleConfig::load_from(Some(path.as_path()))?,
        None => ConsoleConfig::load()?,
    };

    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }
    if let Some(token) = args.token.as_deref().filter(|t| !t.is_empty()) {
        config.token = Some(SecretString::from(token));
    }
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate_ms = tick_rate;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(config: &ConsoleConfig, log_level: &str) -> Result<PathBuf> {
    let level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "employer_console={}",
            level.as_str().to_lowercase()
        ))
    });

    let path = config.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    // Log to file, the terminal belongs to the UI
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    let token = config.require_token()?;
    let log_path = init_logging(&config, &args.log_level)?;

    info!("Employer console v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("API URL: {}", config.api_url);
    debug!("Logging to {}", log_path.display());

    let session = Session::new(
        config.api_url.clone(),
        token,
        config.user.clone(),
        Arc::new(|| info!("Session ended by user logout")),
    );

    let api = HttpAgentApi::from_session(
        &session,
        Duration::from_secs(config.connect_timeout_secs),
    )?;

    let app = TuiApp::new(
        session,
        Arc::new(api),
        Duration::from_millis(config.tick_rate_ms),
    )?;
    app.run().await?;

    info!("Employer console exited");
    Ok(())
}
