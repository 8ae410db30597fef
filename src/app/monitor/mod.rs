//! Connection monitoring
//!
//! Tracks whether the network is up and whether the movie database answers,
//! and classifies the connection by probe latency. Probing adapts its
//! cadence: quicker after a failure, slower while healthy.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use movie_finder::app::{ClientConfig, ConnectionMonitor, MonitorConfig, MovieClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MovieClient::new(ClientConfig::default())?;
//! let monitor = Arc::new(ConnectionMonitor::new(Arc::new(client), MonitorConfig::default()));
//!
//! let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
//! let task = Arc::clone(&monitor).spawn(shutdown_rx);
//!
//! let mut updates = monitor.subscribe();
//! updates.changed().await?;
//! println!("{}", updates.borrow().status_message());
//!
//! let _ = shutdown_tx.send(());
//! task.await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod probe;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::MonitorConfig;
pub use manager::ConnectionMonitor;
pub use probe::ConnectionProbe;
pub use state::{ConnectionQuality, ConnectionState, ConnectionStatus};
