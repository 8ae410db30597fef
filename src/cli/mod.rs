//! Command-line interface components
//!
//! This module contains CLI-specific code for the Movie Finder application,
//! including argument parsing, command handlers, progress display and signal
//! handling.

pub mod args;
pub mod commands;
pub mod progress;
pub mod signals;

pub use args::{
    Cli, Commands, ConfigAction, ConfigArgs, DetailsArgs, FilterArgs, GlobalArgs, SearchArgs,
    StatusArgs,
};
pub use commands::{handle_config, handle_details, handle_filter, handle_search, handle_status};
pub use progress::FilterProgressBar;
pub use signals::{create_shutdown_channel, SignalHandler};
