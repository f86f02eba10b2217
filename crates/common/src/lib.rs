//! ModelServer common library
//!
//! Shared code used by the model server and its client: configuration
//! resolution, the error taxonomy, status translation and metrics.

pub mod config;
pub mod error;
pub mod metrics;
pub mod status;

// Re-export commonly used types
pub use config::{ConfigResolver, ServerOptions, ServingConfiguration};
pub use error::{ModelServerError, Result};
pub use metrics::{MetricsRegistry, METRICS};
pub use status::{translate, EngineStatus, StatusCode};
