//! Execution engine contract
//!
//! The server never runs models itself. It initializes an engine from the
//! resolved configuration once, then shares it read-only across all calls.

pub mod passthrough;

use crate::deadline::RunOptions;
use modelserver_common::EngineStatus;
use modelserver_proto::{PredictRequest, PredictResponse};

pub use passthrough::PassthroughEngine;

/// Runs predict calls against the loaded servables.
///
/// Implementations must be safe for concurrent callers, treat
/// `options.timeout` as a best-effort cutoff, and return
/// `DEADLINE_EXCEEDED` instead of hanging once it has passed. Requests for a
/// model or version that is not loaded fail with a definite status.
pub trait ExecutionEngine: Send + Sync + 'static {
    fn predict(
        &self,
        options: &RunOptions,
        request: &PredictRequest,
    ) -> Result<PredictResponse, EngineStatus>;
}
