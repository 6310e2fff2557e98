//! Pipeline errors.

use thiserror::Error;

/// Errors surfaced by manual event injection.
///
/// The polling loop itself never fails: source errors end the cycle,
/// dispatch failures are per-station outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The injected event carries the "none" category, which never
    /// propagates past ingestion.
    #[error("cannot inject an event with the none category")]
    NoneCategory,

    /// The injected event duplicates a still-active occurrence.
    #[error("event suppressed as a duplicate of a still-active occurrence")]
    Duplicate,
}
