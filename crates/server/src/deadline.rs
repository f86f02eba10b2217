//! Deadlines and execution budgets
//!
//! A deadline is an instant on the monotonic clock. The budget handed to the
//! execution engine is the time left until that instant, never negative.

use std::time::{Duration, Instant};
use tonic::metadata::MetadataMap;

/// Header carrying the client's timeout
pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Per-call options passed to the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Time the engine may spend on the call; unbounded when `None`
    pub timeout: Option<Duration>,
}

impl RunOptions {
    /// Options for a call with the given remaining budget
    pub fn with_budget(budget: Option<Duration>) -> Self {
        Self { timeout: budget }
    }

    /// Budget in whole milliseconds, saturating
    pub fn timeout_millis(&self) -> Option<u64> {
        self.timeout
            .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
    }

    /// True once the budget is used up
    pub fn is_expired(&self) -> bool {
        self.timeout.map(|t| t.is_zero()).unwrap_or(false)
    }
}

/// Time left until `deadline`, measured at `now`.
///
/// `None` deadline means unbounded. A deadline in the past yields zero.
pub fn remaining_budget(deadline: Option<Instant>, now: Instant) -> Option<Duration> {
    deadline.map(|d| d.saturating_duration_since(now))
}

/// Deadline announced by the client's `grpc-timeout` header, anchored at `received`
pub fn deadline_from_metadata(metadata: &MetadataMap, received: Instant) -> Option<Instant> {
    let value = metadata.get(GRPC_TIMEOUT_HEADER)?.to_str().ok()?;
    let timeout = parse_grpc_timeout(value)?;
    received.checked_add(timeout)
}

/// Parse a `grpc-timeout` value: at most eight digits followed by a unit.
pub fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 60 * 60)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}
