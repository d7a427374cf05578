use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health probe response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service for the mock server.
///
/// The mock holds no resources that can degrade, so being able to answer is the whole check.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "PCM mock server is alive".into(),
        }
    }
}
