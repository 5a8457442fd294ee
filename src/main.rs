mod chat;
mod errors;
mod gemini;
mod mood;
mod providers;
mod web;

use std::env;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|arg| arg == "--verbose" || arg == "-v");
    let debug = args.iter().any(|arg| arg == "--debug");
    let version = args.iter().any(|arg| arg == "--version" || arg == "-V");

    // Handle version flag
    if version {
        eprintln!("hari version {}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    // Set log level based on flags
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // Initialize logger with proper stderr output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting hari server version {}", env!("CARGO_PKG_VERSION"));

    // A missing credential is fatal at startup, not a per-turn error
    let gemini_config = gemini::GeminiConfig::from_env()?;
    let client = gemini::GeminiClient::new(gemini_config)?;

    let chat_config = chat::load_config()?;
    let port = chat_config.server_port();

    let state = Arc::new(web::AppState::new(Arc::new(client), chat_config));
    let app = web::build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
            }
            tracing::info!("Server shutting down normally");
        })
        .await?;

    Ok(())
}
