//! Command handlers for Movie Finder CLI
//!
//! This module implements the command handlers that connect CLI arguments
//! to the client, cache, filter engine and connection monitor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::app::{
    ConnectionMonitor, ConnectionState, DetailCache, ItemDetail, MovieClient, SearchItem,
    SearchResult, SmartFilter,
};
use crate::cli::progress::{spinner, FilterProgressBar};
use crate::cli::signals::{create_shutdown_channel, SignalHandler};
use crate::cli::{
    ConfigAction, ConfigArgs, DetailsArgs, FilterArgs, GlobalArgs, SearchArgs, StatusArgs,
};
use crate::config::{AppConfig, LOCAL_CONFIG_FILE};
use crate::errors::{AppError, Result};

/// Build the movie client from configuration and global flags
fn build_client(global: &GlobalArgs, config: &AppConfig) -> Result<MovieClient> {
    let client_config = config.client_config(global.api_key.as_deref());
    debug!(
        "Using {} host(s), {} retries per host",
        client_config.hosts.len(),
        client_config.max_retries
    );
    Ok(MovieClient::new(client_config)?)
}

/// Handle the search command
pub async fn handle_search(args: SearchArgs, global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    let client = build_client(global, config)?;

    let progress = spinner(format!("Searching for '{}'...", args.query), global.quiet);
    let start = Instant::now();
    let result = client.search(&args.query, args.page).await;
    progress.finish_and_clear();
    info!("Search completed in {:?}", start.elapsed());

    if !report_failure(&result) {
        return Ok(());
    }

    println!(
        "🎬 {} result(s) for '{}' (page {}, showing {})",
        result.total_count,
        args.query.trim(),
        args.page.max(1),
        result.items.len()
    );
    println!();
    print_items(&result.items);

    Ok(())
}

/// Handle the details command
pub async fn handle_details(
    args: DetailsArgs,
    global: &GlobalArgs,
    config: &AppConfig,
) -> Result<()> {
    let client = build_client(global, config)?;

    let progress = spinner(format!("Looking up {}...", args.imdb_id), global.quiet);
    let detail = client.get_details(args.imdb_id.trim()).await;
    progress.finish_and_clear();

    match detail {
        Some(detail) => print_detail(&detail),
        None => println!("ℹ️  No details available for {}", args.imdb_id),
    }

    Ok(())
}

/// Handle the filter command
///
/// Searches once, then narrows the page of results. Genre and rating
/// constraints resolve details in batches with a progress bar.
pub async fn handle_filter(args: FilterArgs, global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    args.validate().map_err(AppError::generic)?;
    if !args.is_known_genre() {
        warn!(
            "'{}' is not a well-known genre; matching by substring anyway",
            args.genre.as_deref().unwrap_or_default()
        );
    }

    let client = Arc::new(build_client(global, config)?);

    let progress = spinner(format!("Searching for '{}'...", args.query), global.quiet);
    let result = client.search(&args.query, args.page).await;
    progress.finish_and_clear();

    if !report_failure(&result) {
        return Ok(());
    }

    let criteria = args.criteria();
    let cache = Arc::new(DetailCache::new(client));
    let filter = SmartFilter::new(Arc::clone(&cache))
        .with_batch_size(args.batch_size.unwrap_or(config.filter.batch_size));

    let start = Instant::now();
    let kept = if criteria.has_advanced_filters() {
        let bar = FilterProgressBar::new(global.quiet);
        let kept = filter
            .filter_with_progress(&result.items, &criteria, |p| bar.update(p))
            .await;
        bar.finish(kept.len());
        kept
    } else {
        filter.filter(&result.items, &criteria).await
    };

    info!(
        "Filtered {} item(s) in {:?}; cache: {}",
        result.items.len(),
        start.elapsed(),
        cache.stats().await
    );

    println!(
        "🎬 {} of {} result(s) match ({} active filter(s))",
        kept.len(),
        result.items.len(),
        criteria.active_filter_count()
    );
    println!();
    print_items(&kept);

    Ok(())
}

/// Handle the status command
pub async fn handle_status(args: StatusArgs, global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    let client = build_client(global, config)?;
    let monitor = Arc::new(ConnectionMonitor::new(
        Arc::new(client),
        config.monitor.clone(),
    ));

    if !args.watch {
        let progress = spinner("Checking connection...", global.quiet);
        monitor.check_connection().await;
        progress.finish_and_clear();
        print_state(&monitor.state());
        return Ok(());
    }

    println!("📡 Monitoring connection (Ctrl+C to stop)");

    let (shutdown_tx, mut shutdown_rx) = create_shutdown_channel();
    let signal_task = SignalHandler::new(shutdown_tx.clone()).setup();
    let mut updates = monitor.subscribe();
    let monitor_task = Arc::clone(&monitor).spawn(shutdown_tx.subscribe());

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if !state.is_checking {
                    print_state(&state);
                }
            }
            _ = shutdown_rx.recv() => {
                debug!("Status watch received shutdown signal");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    signal_task.abort();
    if let Err(e) = monitor_task.await {
        warn!("Connection monitor task ended abnormally: {}", e);
    }
    Ok(())
}

/// Handle configuration management
pub async fn handle_config(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.action {
        ConfigAction::Init { force } => {
            let path = match &global.config {
                Some(path) => path.clone(),
                None => AppConfig::default_config_path()
                    .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE)),
            };

            if AppConfig::write_default(&path, force).await? {
                println!("📁 Created default configuration file:");
                println!("   {}", path.display());
                println!("   You can customize settings by editing this file.");
            } else {
                println!("ℹ️  Configuration file already exists: {}", path.display());
                println!("   Use --force to overwrite it.");
            }
        }
        ConfigAction::Show => {
            let config = AppConfig::load(global.config.clone()).await?;
            let source = match &global.config {
                Some(path) => Some(path.clone()),
                None => AppConfig::find_config_file(),
            };
            match source {
                Some(path) => println!("# Loaded from {}", path.display()),
                None => println!("# No configuration file found; showing defaults"),
            }
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Print the failure message of a search; returns whether it succeeded
fn report_failure(result: &SearchResult) -> bool {
    if result.succeeded {
        return true;
    }

    let message = result
        .error_message
        .as_deref()
        .unwrap_or("Search failed");
    println!("❌ {}", message);
    if result.failure.is_some_and(|failure| failure.is_retryable()) {
        println!("   Try again in a moment.");
    }
    false
}

fn print_items(items: &[SearchItem]) {
    for item in items {
        println!("  {:<11} {:<10} {}", item.imdb_id, item.year, item.title);
    }
}

fn print_detail(detail: &ItemDetail) {
    println!("🎬 {} ({})", detail.title, detail.year);
    println!("===================");
    let fields = [
        ("Rated", &detail.rated),
        ("Released", &detail.released),
        ("Runtime", &detail.runtime),
        ("Genre", &detail.genre),
        ("Director", &detail.director),
        ("Writer", &detail.writer),
        ("Actors", &detail.actors),
        ("Language", &detail.language),
        ("Country", &detail.country),
        ("Awards", &detail.awards),
        ("Box office", &detail.box_office),
    ];
    for (label, value) in fields {
        if crate::app::models::is_available(value) {
            println!("{:<11} {}", format!("{}:", label), value);
        }
    }

    match detail.vote_count() {
        Some(votes) => println!("{:<11} {:.1} ({} votes)", "Rating:", detail.rating(), votes),
        None => println!("{:<11} {:.1}", "Rating:", detail.rating()),
    }

    if crate::app::models::is_available(&detail.plot) {
        println!();
        println!("{}", detail.plot);
    }
}

fn print_state(state: &ConnectionState) {
    let icon = if state.status().can_search() {
        "✅"
    } else {
        "⚠️ "
    };
    let latency = state
        .last_latency
        .map(|latency| format!(" ({}ms)", latency.as_millis()))
        .unwrap_or_default();
    println!("{} {}{}: {}", icon, state.status(), latency, state.status_message());
}
