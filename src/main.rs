//! CareerAgent AI inference server entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use careeragent_ai_server::api::{create_router, AppState};
use careeragent_ai_server::config::{Config, LogFormat};
use careeragent_ai_server::utils::shutdown_signal;
use careeragent_ai_server::{metrics, ServerError};

/// CareerAgent AI inference server.
#[derive(Parser, Debug)]
#[command(name = "careeragent-ai-server")]
#[command(about = "HTTP inference server for the CareerAgent platform")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT from the environment).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the inference server (default).
    Run {
        /// HTTP server port (overrides PORT from the environment).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Read .env before looking at LOG_FORMAT
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("careeragent_ai_server=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let log_format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|value| value.parse::<LogFormat>().ok())
        .unwrap_or_default();

    match log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
    }

    // Initialize metrics
    metrics::init_metrics()?;

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CAREERAGENT AI SERVER - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("  Verbose: {}", config.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the inference server.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");

    // Create app state
    let app_state = AppState::new();

    // Start HTTP server
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(ServerError::Io)?;
    app_state.set_ready(true);

    let router = create_router(app_state);

    info!("========================================");
    info!("CAREERAGENT AI SERVER STARTED");
    info!("========================================");
    info!("Listening on: http://{}", addr);
    info!("Prediction endpoint: POST /predict");
    info!("========================================");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Io)?;

    info!("Server shut down cleanly");

    Ok(())
}
