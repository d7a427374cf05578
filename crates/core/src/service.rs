//! The ingestion pipeline shared by every report endpoint.

use crate::config::MockConfig;
use crate::normalize::{normalize, NormalizedBody, ReportShape};
use crate::outcome::assign;
use crate::respond::{respond, Reply};
use rand::Rng;
use std::sync::Arc;

/// Runs inbound bodies through normalize, assign and respond.
///
/// One instance serves all three ingestion endpoints; the [`ReportShape`] passed per call
/// selects the decoding and whether correlation ids are echoed.
#[derive(Clone, Debug)]
pub struct ReportService {
    cfg: Arc<MockConfig>,
}

impl ReportService {
    pub fn new(cfg: Arc<MockConfig>) -> Self {
        Self { cfg }
    }

    /// Simulate the backend's answer to `raw_body` posted on the endpoint for `shape`.
    ///
    /// Never fails: undecodable bodies count as zero reports and simulated failures come back
    /// as an error [`Reply`].
    pub fn handle<R: Rng + ?Sized>(
        &self,
        shape: ReportShape,
        raw_body: &[u8],
        rng: &mut R,
    ) -> Reply {
        let expected = self.cfg.expected_status();
        let normalized = normalize(raw_body, shape);

        if let NormalizedBody::Batch(envelope) = &normalized {
            tracing::debug!(
                "server batch from organization {:?}",
                envelope.organization_id.as_deref().unwrap_or("<none>")
            );
        }
        if expected.is_batch_success() {
            tracing::info!(
                "{}: new post with {} incoming events",
                shape.label(),
                normalized.reports().len()
            );
        }

        let result = assign(
            normalized.reports(),
            expected,
            shape.includes_correlation(),
            rng,
        );
        let reply = respond(result, expected);

        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string_pretty(&reply.body) {
                Ok(rendered) => tracing::debug!("response {}:\n{}", reply.status, rendered),
                Err(e) => tracing::debug!("response {} not renderable: {}", reply.status, e),
            }
        }

        reply
    }
}
