//! ModelServer
//!
//! gRPC front end of a model-serving process. Resolved configuration is handed
//! to an execution engine once at startup; every Predict call is then dispatched
//! to that engine with a deadline-derived time budget and its outcome translated
//! into a gRPC status.

pub mod deadline;
pub mod engine;
pub mod grpc;

pub use deadline::{remaining_budget, RunOptions};
pub use engine::{ExecutionEngine, PassthroughEngine};
pub use grpc::{ModelServer, RequestDispatcher};
