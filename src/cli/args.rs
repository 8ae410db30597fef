//! Command-line argument parsing for Movie Finder
//!
//! This module defines the CLI structure using clap derive macros: movie
//! search, detail lookup, filtered search, connection status and
//! configuration management.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::filter::{current_year, FilterCriteria};
use crate::constants::filter::{GENRES, MIN_YEAR};

/// Movie Finder - search the OMDb movie database
#[derive(Parser, Debug)]
#[command(
    name = "movie_finder",
    version,
    about = "Search the OMDb movie database from the command line",
    long_about = "Search movies, look up details and narrow results by genre, year and rating.
Requests are retried with backoff and fall back to mirror hosts when the primary is down."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API key (overrides OMDB_API_KEY and the config file)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search movies by title
    Search(SearchArgs),

    /// Show full details for one movie
    Details(DetailsArgs),

    /// Search and narrow the results by genre, year and rating
    Filter(FilterArgs),

    /// Check connectivity to the movie database
    Status(StatusArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the search command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Title to search for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Result page
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Arguments for the details command
#[derive(Args, Debug, Clone)]
pub struct DetailsArgs {
    /// IMDb identifier, e.g. tt0113277
    #[arg(value_name = "IMDB_ID")]
    pub imdb_id: String,
}

/// Arguments for the filter command
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Title to search for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Result page
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Keep movies whose genre list contains this genre
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Earliest release year
    #[arg(long)]
    pub min_year: Option<i32>,

    /// Latest release year
    #[arg(long)]
    pub max_year: Option<i32>,

    /// Minimum IMDb rating (0-10)
    #[arg(short = 'r', long, default_value = "0")]
    pub min_rating: f64,

    /// Detail lookups per batch (overrides the config file)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Arguments for the status command
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Keep monitoring until Ctrl+C
    #[arg(short, long)]
    pub watch: bool,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a commented default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level requested by flags, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl FilterArgs {
    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=10.0).contains(&self.min_rating) {
            return Err(format!(
                "Minimum rating must be between 0 and 10, got {}",
                self.min_rating
            ));
        }

        let criteria = self.criteria();
        if criteria.year_range.min > criteria.year_range.max {
            return Err(format!(
                "--min-year {} is after --max-year {}",
                criteria.year_range.min, criteria.year_range.max
            ));
        }

        if self.batch_size == Some(0) {
            return Err("Batch size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Build filter criteria, defaulting the year range to 1900..current year
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_genre(self.genre.clone().unwrap_or_default())
            .with_year_range(
                self.min_year.unwrap_or(MIN_YEAR),
                self.max_year.unwrap_or_else(current_year),
            )
            .with_min_rating(self.min_rating)
    }

    /// Whether the genre is one of the well-known genres
    pub fn is_known_genre(&self) -> bool {
        match &self.genre {
            Some(genre) => GENRES.iter().any(|known| known.eq_ignore_ascii_case(genre)),
            None => true,
        }
    }
}
