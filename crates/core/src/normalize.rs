//! Inbound body decoding.
//!
//! Three wire encodings reach the mock: a plain JSON array of reports, the same array posted to
//! the anonymized open-data endpoint, and a signed server batch whose JSON payload travels in the
//! middle segment of a `header.payload.signature` token.
//!
//! Decoding is best-effort. A body that cannot be decoded is logged and treated as zero
//! submitted reports; the caller still gets a well-formed response.

use crate::error::{MockError, MockResult};
use crate::report::{reports_from_values, BatchEnvelope, ReportRecord};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Which endpoint a body arrived on, and therefore how it is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportShape {
    /// `/report-api/v1/private/report`
    PlainArray,
    /// `/report-api/v1/opendata/report`
    AnonymizedArray,
    /// `/report-api/v1/server-batch`
    SignedBatch,
}

impl ReportShape {
    /// Whether outcomes for this shape echo the client's correlation id.
    ///
    /// Open-data reports are anonymized, so their outcomes never carry one.
    pub fn includes_correlation(self) -> bool {
        !matches!(self, ReportShape::AnonymizedArray)
    }

    /// Human-readable endpoint name for log lines.
    pub fn label(self) -> &'static str {
        match self {
            ReportShape::PlainArray => "private report",
            ReportShape::AnonymizedArray => "open data report",
            ReportShape::SignedBatch => "server batch",
        }
    }
}

/// A decoded request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizedBody {
    Reports(Vec<ReportRecord>),
    Batch(BatchEnvelope),
}

impl NormalizedBody {
    /// The decoded reports in submission order, whichever shape carried them.
    pub fn reports(&self) -> &[ReportRecord] {
        match self {
            NormalizedBody::Reports(reports) => reports,
            NormalizedBody::Batch(envelope) => &envelope.events,
        }
    }
}

/// Decode `raw_body` according to `shape`, substituting an empty report sequence on failure.
pub fn normalize(raw_body: &[u8], shape: ReportShape) -> NormalizedBody {
    match shape {
        ReportShape::PlainArray | ReportShape::AnonymizedArray => {
            let reports = decode_report_array(raw_body).unwrap_or_else(|e| {
                tracing::warn!("discarding undecodable {} body: {}", shape.label(), e);
                Vec::new()
            });
            NormalizedBody::Reports(reports)
        }
        ReportShape::SignedBatch => {
            let envelope = decode_signed_batch(raw_body).unwrap_or_else(|e| {
                tracing::warn!("discarding undecodable {} body: {}", shape.label(), e);
                BatchEnvelope::default()
            });
            NormalizedBody::Batch(envelope)
        }
    }
}

/// Decode a JSON array of reports.
///
/// Only a body that is not a JSON array fails. Inside the array every element yields a report,
/// with mistyped metadata fields read as absent.
pub fn decode_report_array(raw_body: &[u8]) -> MockResult<Vec<ReportRecord>> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(raw_body)?;
    Ok(reports_from_values(values))
}

/// Trusted decode, no verification.
///
/// Splits a compact `header.payload.signature` token and parses the second segment as a
/// [`BatchEnvelope`]. Any other segment, present or missing, is never inspected: this is a
/// structural unwrap for a test double and must not be used as an authentication check.
pub fn decode_signed_batch(raw_body: &[u8]) -> MockResult<BatchEnvelope> {
    // Non-UTF-8 bytes cannot form a valid token; lossy conversion lets the segment check and
    // base64 decode reject them with a precise error.
    let body = String::from_utf8_lossy(raw_body);
    let segments: Vec<&str> = body.trim().split('.').collect();
    let [_header, payload, ..] = segments.as_slice() else {
        return Err(MockError::MalformedToken {
            segments: segments.len(),
        });
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    tracing::debug!(
        "decoded server batch payload: {}",
        String::from_utf8_lossy(&decoded)
    );
    Ok(serde_json::from_slice(&decoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(payload: &str) -> String {
        format!("eyJhbGciOiJQUzI1NiJ9.{}.c2lnbmF0dXJl", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn plain_array_preserves_order() {
        let body = br#"[{"correlationId":"a"},{"correlationId":"b"},{"correlationId":"c"}]"#;
        let normalized = normalize(body, ReportShape::PlainArray);
        let reports = normalized.reports();

        let ids: Vec<_> = reports
            .iter()
            .map(|r| r.correlation_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn malformed_array_degrades_to_empty() {
        let bodies: [&[u8]; 4] = [b"not json", br#"{"correlationId":"a"}"#, b"", b"[1,2"];
        for body in bodies {
            assert!(normalize(body, ReportShape::PlainArray).reports().is_empty());
            assert!(normalize(body, ReportShape::AnonymizedArray).reports().is_empty());
        }
    }

    #[test]
    fn mistyped_metadata_keeps_every_record() {
        let body = br#"[
            {"correlationId":"c1","processTimespan":12.5},
            {"correlationId":"c2","statusCode":"201"},
            null,
            7
        ]"#;
        let normalized = normalize(body, ReportShape::PlainArray);
        let reports = normalized.reports();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].echoable_correlation_id(), Some("c1"));
        assert_eq!(reports[1].echoable_correlation_id(), Some("c2"));
        assert_eq!(reports[2], ReportRecord::default());
        assert_eq!(reports[3], ReportRecord::default());
    }

    #[test]
    fn anonymized_shape_decodes_like_plain() {
        let body = br#"[{"correlationId":"a","endpoint":"/x"}]"#;
        assert_eq!(
            normalize(body, ReportShape::AnonymizedArray),
            normalize(body, ReportShape::PlainArray)
        );
        assert!(!ReportShape::AnonymizedArray.includes_correlation());
        assert!(ReportShape::PlainArray.includes_correlation());
        assert!(ReportShape::SignedBatch.includes_correlation());
    }

    #[test]
    fn signed_batch_yields_envelope() {
        let token = token_for(r#"{"organizationId":"o1","events":[{"correlationId":"c1"}]}"#);
        let NormalizedBody::Batch(envelope) = normalize(token.as_bytes(), ReportShape::SignedBatch)
        else {
            panic!("expected batch envelope");
        };

        assert_eq!(envelope.organization_id.as_deref(), Some("o1"));
        assert_eq!(envelope.events.len(), 1);
        assert_eq!(envelope.events[0].correlation_id.as_deref(), Some("c1"));
    }

    #[test]
    fn signed_batch_tolerates_whitespace_and_padding() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"events":[{},{}]}"#);
        let token = format!("  h.{payload}==.s\n");
        let envelope = decode_signed_batch(token.as_bytes()).unwrap();
        assert_eq!(envelope.events.len(), 2);
    }

    #[test]
    fn signed_batch_needs_a_payload_segment() {
        let err = decode_signed_batch(b"nodots").unwrap_err();
        assert!(matches!(err, MockError::MalformedToken { segments: 1 }));

        assert!(normalize(b"nodots", ReportShape::SignedBatch)
            .reports()
            .is_empty());
    }

    #[test]
    fn signed_batch_rejects_bad_base64_and_json() {
        let err = decode_signed_batch(b"h.!!!.s").unwrap_err();
        assert!(matches!(err, MockError::InvalidBase64(_)));

        let token = token_for("[not an envelope");
        let err = decode_signed_batch(token.as_bytes()).unwrap_err();
        assert!(matches!(err, MockError::InvalidJson(_)));

        assert!(normalize(token.as_bytes(), ReportShape::SignedBatch)
            .reports()
            .is_empty());
    }

    #[test]
    fn signed_batch_reads_second_segment_regardless_of_count() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"events":[{"correlationId":"c1"}]}"#);

        for token in [format!("h.{payload}"), format!("h.{payload}.s.extra")] {
            let normalized = normalize(token.as_bytes(), ReportShape::SignedBatch);
            let reports = normalized.reports();
            assert_eq!(reports.len(), 1, "token {token:?}");
            assert_eq!(reports[0].echoable_correlation_id(), Some("c1"));
        }
    }

    #[test]
    fn header_and_signature_are_not_checked() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"events":[{"correlationId":"x"}]}"#);
        let token = format!("garbage.{payload}.");
        let envelope = decode_signed_batch(token.as_bytes()).unwrap();
        assert_eq!(envelope.events[0].correlation_id.as_deref(), Some("x"));
    }
}
