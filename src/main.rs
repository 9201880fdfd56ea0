//! UserPosts - profile + posts aggregation service
//!
//! Serves `GET /v1/user-posts/{userId}`: fetches a user's profile and posts
//! from a JSONPlaceholder-compatible API in parallel and returns them merged.
//!
//! Exit codes:
//!   0 - Clean shutdown
//!   1 - Startup error (bad arguments, config, bind failure, etc.)

mod aggregator;
mod cli;
mod config;
mod error;
mod models;
mod server;
mod upstream;

use aggregator::UserPostsAggregator;
use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use upstream::{ReqwestTransport, TransportOptions, UpstreamClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("UserPosts v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    if let Err(e) = run(config).await {
        error!("Service failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .userposts.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", DEFAULT_CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Wire the upstream client, aggregator and router, then serve.
async fn run(config: Config) -> Result<()> {
    let transport = ReqwestTransport::new(&TransportOptions {
        timeout: config.upstream.timeout(),
        user_agent: config.upstream.user_agent.clone(),
    })
    .context("Failed to create HTTP client")?;

    let aggregator = UserPostsAggregator::new(UpstreamClient::new(
        transport,
        config.upstream.base_url.clone(),
    ));

    info!(
        "Upstream: {} (timeout {}s)",
        aggregator.client().base_url(),
        config.upstream.timeout_seconds
    );

    let app = server::router(aggregator);
    server::serve(&config.server.listen_addr, app).await
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
