//! Mock runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handlers never read process arguments themselves, so every request in a run sees the same
//! simulated outcome.

use crate::constants::DEFAULT_EXPECTED_STATUS;
use std::fmt;

/// HTTP status the operator asked the mock to emit for every ingestion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExpectedStatus(u16);

impl ExpectedStatus {
    /// Wraps `code` if it can be sent as a final response (`200..=999`).
    ///
    /// Informational 1xx codes are rejected: the HTTP stack cannot emit them as a final
    /// response and would answer 500 with no body instead.
    pub fn new(code: u16) -> Option<Self> {
        (200..=999).contains(&code).then_some(Self(code))
    }

    /// The numeric status code.
    pub fn code(self) -> u16 {
        self.0
    }

    /// True for the batch-success range (200 and 207).
    pub fn is_batch_success(self) -> bool {
        matches!(self.0, 200 | 207)
    }

    /// True when outcomes may carry the advisory message (207 only).
    pub fn carries_messages(self) -> bool {
        self.0 == 207
    }
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        Self(DEFAULT_EXPECTED_STATUS)
    }
}

impl fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the simulated status from an optional start-up value.
///
/// Absent, empty, non-integer or out-of-range values fall back to `200`. This never fails; an
/// operator typo should still produce a running mock.
pub fn resolve_expected_status(value: Option<&str>) -> ExpectedStatus {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return ExpectedStatus::default();
    };

    match raw.parse::<u16>().ok().and_then(ExpectedStatus::new) {
        Some(status) => status,
        None => {
            tracing::warn!(
                "expected status {:?} is not a usable HTTP status, defaulting to {}",
                raw,
                DEFAULT_EXPECTED_STATUS
            );
            ExpectedStatus::default()
        }
    }
}

/// Mock configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    expected_status: ExpectedStatus,
}

impl MockConfig {
    /// Create a new `MockConfig`.
    pub fn new(expected_status: ExpectedStatus) -> Self {
        Self { expected_status }
    }

    /// Status every ingestion request in this run answers with.
    pub fn expected_status(&self) -> ExpectedStatus {
        self.expected_status
    }
}
