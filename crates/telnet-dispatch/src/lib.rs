//! Protocol command construction and TCP dispatch to station clusters.
//!
//! Field stations listen behind three regional server clusters, each
//! reachable on one host and a fixed, ordered list of ports. Commands are a
//! single positional line (`$GMNG122 L00112`) terminated by CRLF; the first
//! inbound chunk is the acknowledgement. This crate owns:
//!
//! - [`alert_code`] / [`build_command`] - category-to-code table and the
//!   byte-exact wire command
//! - [`ClusterTable`] / [`DispatcherConfig`] - fixed endpoint configuration
//! - [`TelnetDispatcher`] - per-station dispatch with strict in-order port
//!   failover, bounded attempt timeouts, and per-cluster fan-out
//!
//! # Example
//!
//! ```no_run
//! use alert_core::AlertCategory;
//! use telnet_dispatch::{DispatcherConfig, TelnetDispatcher};
//!
//! # async fn example(stations: Vec<alert_core::Station>) {
//! let dispatcher = TelnetDispatcher::new(DispatcherConfig::default());
//! let outcomes = dispatcher
//!     .send_to_stations(&stations, AlertCategory::Missiles)
//!     .await;
//! for outcome in &outcomes {
//!     println!("{}: ok={}", outcome.station.display_name, outcome.success);
//! }
//! # }
//! ```

mod client;
mod codec;
mod config;
mod error;

pub use client::TelnetDispatcher;
pub use codec::{alert_code, build_command, COMMAND_MARKER, LINE_TERMINATOR};
pub use config::{ClusterEndpoint, ClusterTable, DispatcherConfig, DEFAULT_PORTS};
pub use error::DispatchError;
