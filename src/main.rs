//! Movie Finder CLI application
//!
//! Command-line interface for searching the OMDb movie database with
//! resilient requests, cached detail lookups and smart filtering.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use movie_finder::cli::{
    handle_config, handle_details, handle_filter, handle_search, handle_status, Cli, Commands,
};
use movie_finder::config::AppConfig;
use movie_finder::constants::logging::DEFAULT_LOG_LEVEL;
use movie_finder::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let flag_level = cli.log_level().map(|level| level.to_string().to_lowercase());
    let Cli { global, command } = cli;

    // `config init` must work even when the configured file is missing
    let command = match command {
        Commands::Config(args) => {
            let level = flag_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
            init_logging(&level, global.very_verbose);
            return handle_config(args, &global).await;
        }
        other => other,
    };

    let config = AppConfig::load(global.config.clone()).await?;
    let level = flag_level.unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, global.very_verbose);

    info!("Movie Finder v{} starting", env!("CARGO_PKG_VERSION"));

    match command {
        Commands::Search(args) => {
            info!("Executing search command");
            handle_search(args, &global, &config).await
        }
        Commands::Details(args) => {
            info!("Executing details command");
            handle_details(args, &global, &config).await
        }
        Commands::Filter(args) => {
            info!("Executing filter command");
            handle_filter(args, &global, &config).await
        }
        Commands::Status(args) => {
            info!("Executing status command");
            handle_status(args, &global, &config).await
        }
        Commands::Config(args) => handle_config(args, &global).await,
    }
}

/// Initialize logging at the given level for this crate
fn init_logging(level: &str, show_levels: bool) {
    let mut filter = EnvFilter::from_default_env();
    match format!("movie_finder={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(show_levels)
        .init();

    if show_levels {
        info!("Very verbose logging enabled");
    }
}
