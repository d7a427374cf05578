//! Report identifier utilities.
//!
//! Every acknowledgment the mock returns carries a `reportId` that the client under test may
//! store and later quote back. The real backend issues RFC 4122 version 4 UUIDs in their
//! hyphenated lowercase form, so the mock does the same.
//!
//! Identifiers are drawn from a caller-supplied random source rather than a process-wide
//! generator. Production handlers pass a freshly seeded generator per request; tests pass a
//! seeded one and get reproducible identifiers.
//!
//! ## Text form
//! - Length: 36
//! - Lowercase hex with hyphens at positions 8, 13, 18 and 23
//! - Example: `550e8400-e29b-41d4-a716-446655440000`

mod service;

pub use service::ReportId;

/// Error type for report identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportIdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for report identifier operations.
pub type ReportIdResult<T> = Result<T, ReportIdError>;
