//! Report and outcome model shared by every ingestion endpoint.
//!
//! Inbound fields are all optional: clients under test routinely send partial reports and the
//! mock acknowledges them anyway. Only `correlationId` is ever read by the simulation.

use pcm_uuid::ReportId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One client-submitted event awaiting acknowledgment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRecord {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub client_org_id: Option<String>,
    #[serde(
        rename = "clientSSId",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_ss_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fapi_interaction_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub server_org_id: Option<String>,
    #[serde(
        rename = "serverASId",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_as_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub endpoint_uri_prefix: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub process_timespan: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<AdditionalInfo>,
}

impl ReportRecord {
    /// The correlation id to echo back, if the client supplied a non-empty one.
    pub fn echoable_correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Build one report per array element.
///
/// Elements that are not objects still count as a (blank) report, so a client that sends N
/// elements gets N outcomes back.
pub fn reports_from_values(values: Vec<Value>) -> Vec<ReportRecord> {
    values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect()
}

/// Pass-through field decoding: a value of the wrong JSON type reads as absent instead of
/// failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_reports<'de, D>(deserializer: D) -> Result<Vec<ReportRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(reports_from_values(values)),
        _ => Ok(Vec::new()),
    }
}

/// Optional consent and payment context attached to a report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub consent_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub person_type: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub local_instrument: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
}

/// Payload recovered from a signed server batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchEnvelope {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(deserialize_with = "lenient_reports")]
    pub events: Vec<ReportRecord>,
}

/// Acknowledgment status for a single report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Accepted,
    Discarded,
    PairedInconsistent,
    Unpaired,
    Single,
}

impl OutcomeStatus {
    /// The full outcome vocabulary, in a fixed order used for uniform selection.
    pub const ALL: [OutcomeStatus; 5] = [
        OutcomeStatus::Accepted,
        OutcomeStatus::Discarded,
        OutcomeStatus::PairedInconsistent,
        OutcomeStatus::Unpaired,
        OutcomeStatus::Single,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Accepted => "ACCEPTED",
            OutcomeStatus::Discarded => "DISCARDED",
            OutcomeStatus::PairedInconsistent => "PAIRED_INCONSISTENT",
            OutcomeStatus::Unpaired => "UNPAIRED",
            OutcomeStatus::Single => "SINGLE",
        }
    }
}

/// Synthesized acknowledgment for one report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
    #[schema(value_type = String)]
    pub report_id: ReportId,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body returned for a simulated request rejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorPayload {
    pub message: String,
}
