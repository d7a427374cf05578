//! # PCM Core
//!
//! Response-simulation engine for the PCM report-ingestion mock.
//!
//! This crate contains the pure request-to-response logic:
//! - Start-up resolution of the simulated status (`config`)
//! - Decoding of the three inbound body shapes (`normalize`)
//! - Per-report outcome synthesis from an injected random source (`outcome`)
//! - Rendering of batch and error replies, plus the canned token (`respond`)
//!
//! **No transport concerns**: routing, HTTP servers and request extraction belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod outcome;
pub mod report;
pub mod respond;
pub mod service;

pub use config::{resolve_expected_status, ExpectedStatus, MockConfig};
pub use error::{MockError, MockResult};
pub use normalize::{normalize, NormalizedBody, ReportShape};
pub use outcome::{assign, error_message, SimulationResult};
pub use report::{
    AdditionalInfo, BatchEnvelope, ErrorPayload, OutcomeRecord, OutcomeStatus, ReportRecord,
};
pub use respond::{respond, Reply, ReplyBody, TokenResponse};
pub use service::ReportService;
