//! Execution status and its translation to gRPC status
//!
//! The execution engine reports outcomes as an [`EngineStatus`]: one of the
//! canonical error codes plus a free-form message. Before it reaches the wire,
//! [`translate`] maps the code onto [`tonic::Code`] and bounds the message size.

use std::fmt;

/// Maximum number of message characters forwarded to the client.
pub const ERROR_MESSAGE_LIMIT: usize = 1024;

/// Appended to messages cut at [`ERROR_MESSAGE_LIMIT`].
pub const TRUNCATION_MARKER: &str = "...TRUNCATED";

/// Canonical status codes reported by the execution engine.
///
/// Discriminants follow the canonical numbering shared with gRPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl StatusCode {
    /// Every code, in numeric order
    pub const ALL: [StatusCode; 17] = [
        StatusCode::Ok,
        StatusCode::Cancelled,
        StatusCode::Unknown,
        StatusCode::InvalidArgument,
        StatusCode::DeadlineExceeded,
        StatusCode::NotFound,
        StatusCode::AlreadyExists,
        StatusCode::PermissionDenied,
        StatusCode::ResourceExhausted,
        StatusCode::FailedPrecondition,
        StatusCode::Aborted,
        StatusCode::OutOfRange,
        StatusCode::Unimplemented,
        StatusCode::Internal,
        StatusCode::Unavailable,
        StatusCode::DataLoss,
        StatusCode::Unauthenticated,
    ];

    /// The wire code this internal code is reported as
    pub fn to_wire(self) -> tonic::Code {
        match self {
            StatusCode::Ok => tonic::Code::Ok,
            StatusCode::Cancelled => tonic::Code::Cancelled,
            StatusCode::Unknown => tonic::Code::Unknown,
            StatusCode::InvalidArgument => tonic::Code::InvalidArgument,
            StatusCode::DeadlineExceeded => tonic::Code::DeadlineExceeded,
            StatusCode::NotFound => tonic::Code::NotFound,
            StatusCode::AlreadyExists => tonic::Code::AlreadyExists,
            StatusCode::PermissionDenied => tonic::Code::PermissionDenied,
            StatusCode::ResourceExhausted => tonic::Code::ResourceExhausted,
            StatusCode::FailedPrecondition => tonic::Code::FailedPrecondition,
            StatusCode::Aborted => tonic::Code::Aborted,
            StatusCode::OutOfRange => tonic::Code::OutOfRange,
            StatusCode::Unimplemented => tonic::Code::Unimplemented,
            StatusCode::Internal => tonic::Code::Internal,
            StatusCode::Unavailable => tonic::Code::Unavailable,
            StatusCode::DataLoss => tonic::Code::DataLoss,
            StatusCode::Unauthenticated => tonic::Code::Unauthenticated,
        }
    }

    /// Upper snake case name, used as a metrics label
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Cancelled => "CANCELLED",
            StatusCode::Unknown => "UNKNOWN",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::AlreadyExists => "ALREADY_EXISTS",
            StatusCode::PermissionDenied => "PERMISSION_DENIED",
            StatusCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::Aborted => "ABORTED",
            StatusCode::OutOfRange => "OUT_OF_RANGE",
            StatusCode::Unimplemented => "UNIMPLEMENTED",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unavailable => "UNAVAILABLE",
            StatusCode::DataLoss => "DATA_LOSS",
            StatusCode::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome reported by the execution engine for a failed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStatus {
    pub code: StatusCode,
    pub message: String,
}

impl EngineStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidArgument, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NotFound, msg)
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::Unavailable, msg)
    }

    pub fn deadline_exceeded(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::DeadlineExceeded, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::Internal, msg)
    }

    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for EngineStatus {}

/// Translate an engine outcome into the status returned to the client.
///
/// Messages longer than [`ERROR_MESSAGE_LIMIT`] characters keep their first
/// [`ERROR_MESSAGE_LIMIT`] characters followed by [`TRUNCATION_MARKER`].
pub fn translate(status: &EngineStatus) -> tonic::Status {
    tonic::Status::new(status.code.to_wire(), truncate_message(&status.message))
}

fn truncate_message(message: &str) -> String {
    match message.char_indices().nth(ERROR_MESSAGE_LIMIT) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
            truncated.push_str(&message[..cut]);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => message.to_string(),
    }
}
