//! Host-owned progress reporting and cooperative cancellation.
//!
//! The engine polls [`Progress::is_cancelled`] between validation stages
//! only; a single stage is never interrupted mid-computation.

/// Callback handle a host may pass into the validation pipeline.
pub trait Progress {
    /// Called after each completed validation stage.
    fn worked(&mut self, _stage: &str) {}

    /// Polled between stages; `true` stops the pipeline early.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Progress sink that ignores everything.
#[derive(Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {}
