//! Constants used throughout the PCM core crate.
//!
//! Fixture values the mock server hands back to clients live here so that handlers and tests
//! agree on them.

/// Status the server simulates when no usable override is supplied at start-up.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// Advisory text attached to some outcomes when a 207 run is simulated.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing fields message example";

/// Fallback message for simulated failure codes without a dedicated entry.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal Server Error";

/// Access token returned by the token stub.
pub const CANNED_ACCESS_TOKEN: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCIsImtpZCI6IkFiT";

/// Lifetime in seconds advertised by the token stub.
pub const CANNED_TOKEN_EXPIRES_IN: u32 = 21_600;

/// Token type advertised by the token stub.
pub const CANNED_TOKEN_TYPE: &str = "Bearer";
