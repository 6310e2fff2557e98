//! Core types and trait seams for the oref-relay alert dispatch pipeline.
//!
//! This crate defines the shared vocabulary of the system:
//!
//! - [`AlertCategory`] / [`AlertEvent`] - what the public alert feed reports
//! - [`Station`] / [`ServerCluster`] - where notification commands go
//! - [`DispatchOutcome`] / [`DispatchSummary`] / [`AlertReport`] - what came
//!   of a dispatch batch
//! - [`AlertSource`] - the seam behind which the external feed client lives
//! - [`ReportSink`] - the seam through which finished reports leave the core
//!
//! # Example
//!
//! ```rust
//! use alert_core::{async_trait, AlertEvent, AlertSource, SourceError};
//!
//! struct QuietSource;
//!
//! #[async_trait]
//! impl AlertSource for QuietSource {
//!     async fn current_alert(&self) -> Result<Option<AlertEvent>, SourceError> {
//!         Ok(None)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "QuietSource"
//!     }
//! }
//! ```

mod category;
mod error;
mod event;
mod outcome;
mod sink;
mod source;
mod station;

pub use category::AlertCategory;
pub use error::SourceError;
pub use event::AlertEvent;
pub use outcome::{AlertReport, DispatchOutcome, DispatchSummary, ServerUsed};
pub use sink::ReportSink;
pub use source::AlertSource;
pub use station::{ServerCluster, Station, UnknownCluster};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
