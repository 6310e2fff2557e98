//! The poll-resolve-dispatch loop.
//!
//! One [`AlertPipeline`] owns the whole cycle: poll the alert source on a
//! fixed cadence, suppress repeats of the same still-active event, resolve
//! the affected stations, dispatch the protocol commands, and hand the
//! finished [`AlertReport`](alert_core::AlertReport) to every subscribed
//! sink. The deduplicator and the running statistics are state of the
//! pipeline instance, reachable only through it - there is no process-wide
//! singleton.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use alert_pipeline::{AlertPipeline, PipelineConfig};
//! use station_index::StationIndex;
//! use telnet_dispatch::{DispatcherConfig, TelnetDispatcher};
//!
//! # async fn example(
//! #     source: Arc<dyn alert_core::AlertSource>,
//! #     index: StationIndex,
//! #     sink: Arc<dyn alert_core::ReportSink>,
//! # ) {
//! let dispatcher = TelnetDispatcher::new(DispatcherConfig::default());
//! let mut pipeline = AlertPipeline::new(source, index, dispatcher, PipelineConfig::default());
//! pipeline.subscribe(sink);
//!
//! let handle = pipeline.handle();
//! tokio::spawn(pipeline.run());
//! // ... later
//! handle.stop();
//! # }
//! ```

mod config;
mod dedup;
mod error;
mod pipeline;
mod stats;

pub use config::PipelineConfig;
pub use dedup::{DedupConfig, Deduplicator};
pub use error::PipelineError;
pub use pipeline::{AlertPipeline, PipelineHandle};
pub use stats::PipelineStats;
