//! Rendering simulation results into response status and body.

use crate::config::ExpectedStatus;
use crate::constants::{CANNED_ACCESS_TOKEN, CANNED_TOKEN_EXPIRES_IN, CANNED_TOKEN_TYPE};
use crate::outcome::SimulationResult;
use crate::report::{ErrorPayload, OutcomeRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of an ingestion response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    Batch(Vec<OutcomeRecord>),
    Error(ErrorPayload),
}

/// A rendered ingestion response: the simulated status plus its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: ReplyBody,
}

/// Render `result` under the simulated `expected` status.
///
/// Both success and error bodies go out with the expected status verbatim.
pub fn respond(result: SimulationResult, expected: ExpectedStatus) -> Reply {
    let body = match result {
        SimulationResult::BatchSuccess(outcomes) => ReplyBody::Batch(outcomes),
        SimulationResult::Error(payload) => ReplyBody::Error(payload),
    };
    Reply {
        status: expected.code(),
        body,
    }
}

/// Body returned by the token stub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u32,
    pub token_type: String,
}

impl TokenResponse {
    /// The fixed bearer token. Independent of the request and of the simulated status.
    pub fn canned() -> Self {
        Self {
            access_token: CANNED_ACCESS_TOKEN.into(),
            expires_in: CANNED_TOKEN_EXPIRES_IN,
            token_type: CANNED_TOKEN_TYPE.into(),
        }
    }
}
