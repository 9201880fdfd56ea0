//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and log level selection.

use clap::Parser;
use std::path::PathBuf;

/// UserPosts - profile + posts aggregation service
///
/// Serves GET /v1/user-posts/{userId}, merging a user's profile and posts
/// fetched concurrently from a JSONPlaceholder-compatible API.
///
/// Examples:
///   userposts
///   userposts --listen 0.0.0.0:8080 --base-url http://localhost:3000
///   userposts --config ./userposts.toml --verbose
///   userposts --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .userposts.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(short, long, value_name = "ADDR", env = "USERPOSTS_LISTEN")]
    pub listen: Option<String>,

    /// Base URL of the upstream Users/Posts API (overrides config)
    #[arg(short, long, value_name = "URL", env = "USERPOSTS_BASE_URL")]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .userposts.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
