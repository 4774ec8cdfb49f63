//! ComicFinder: find nearby comic book stores
//!
//! This is the main entry point for the application.

use anyhow::Result;
use comicfinder::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        Command::Run { config } => config,
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("comicfinder {}", comicfinder::VERSION);
            return Ok(());
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting ComicFinder v{}", comicfinder::VERSION);

    // Load configuration
    let settings = config::load(config_path.as_deref())?;
    if settings.provider.credential().is_none() {
        warn!("No provider API key configured; searches will fail until API_KEY is set");
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Create application state
    let state = AppState::new(settings.clone(), client);
    info!(
        "Search strategies: {}",
        state.search.strategy_names().join(", ")
    );

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, PartialEq)]
enum Command {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Command> {
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a file path", arg))?;
                config = Some(PathBuf::from(path));
            }
            other => return Err(anyhow::anyhow!("unknown argument: {}", other)),
        }
    }

    Ok(Command::Run { config })
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
ComicFinder v{}
Finds nearby comic book stores through the Google Places API

USAGE:
    comicfinder [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    API_KEY                      Google Places API key
    COMICFINDER_API_KEY          Google Places API key (takes precedence)
    COMICFINDER_SETTINGS_PATH    Path to settings.yml
    COMICFINDER_PORT             Server port
    COMICFINDER_BIND_ADDRESS     Bind address
    COMICFINDER_STATIC_DIR       Directory with the browser client
    COMICFINDER_PROVIDER_URL     Places API base URL
    RUST_LOG                     Log filter (default: info)
"#,
        comicfinder::VERSION
    );
}
