//! Common error types for ModelServer
//!
//! Configuration and startup errors are fatal and stop the process before it
//! serves anything. Request errors are per call and always end up as a gRPC
//! status for the calling client.

use crate::status::{translate, EngineStatus};
use std::net::AddrParseError;
use thiserror::Error;

/// Main error type for ModelServer
#[derive(Error, Debug)]
pub enum ModelServerError {
    /// Bad, missing or contradictory operator input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The execution engine could not be initialized
    #[error("Startup error: {0}")]
    Startup(String),

    /// A single call failed inside the execution engine
    #[error("Request error: {0}")]
    Request(EngineStatus),

    /// gRPC transport errors
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// gRPC status returned by a remote server
    #[error("gRPC error: {0}")]
    Grpc(#[from] tonic::Status),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<AddrParseError> for ModelServerError {
    fn from(err: AddrParseError) -> Self {
        ModelServerError::InvalidInput(err.to_string())
    }
}

impl From<EngineStatus> for ModelServerError {
    fn from(status: EngineStatus) -> Self {
        ModelServerError::Request(status)
    }
}

impl ModelServerError {
    /// Convert error to gRPC status code
    pub fn to_status(&self) -> tonic::Status {
        match self {
            ModelServerError::Request(status) => translate(status),
            ModelServerError::Grpc(status) => status.clone(),
            ModelServerError::Transport(_) => tonic::Status::unavailable("Transport error"),
            ModelServerError::Configuration(msg) => {
                tonic::Status::failed_precondition(format!("Configuration error: {}", msg))
            }
            ModelServerError::Startup(msg) => {
                tonic::Status::unavailable(format!("Startup error: {}", msg))
            }
            ModelServerError::Io(err) => tonic::Status::internal(format!("I/O error: {}", err)),
            ModelServerError::InvalidInput(msg) => {
                tonic::Status::invalid_argument(format!("Invalid input: {}", msg))
            }
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ModelServerError::Configuration(msg.into())
    }

    /// Create a startup error
    pub fn startup(msg: impl Into<String>) -> Self {
        ModelServerError::Startup(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ModelServerError::InvalidInput(msg.into())
    }

    /// True for errors that must stop the process
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ModelServerError::Configuration(_) | ModelServerError::Startup(_)
        )
    }
}

/// Result type alias for ModelServer operations
pub type Result<T> = std::result::Result<T, ModelServerError>;
