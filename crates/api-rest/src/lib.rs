//! # API REST
//!
//! HTTP listener for the PCM mock.
//!
//! Handles:
//! - Routing of the three report-ingestion paths onto the shared `pcm-core` pipeline
//! - The canned OAuth token stub
//! - Health probe and OpenAPI/Swagger documentation
//!
//! Request bodies are taken as raw bytes whatever their `Content-Type`; decoding and leniency
//! are the core's business.

#![warn(rust_2018_idioms)]

pub mod health;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pcm_core::{
    AdditionalInfo, BatchEnvelope, ErrorPayload, OutcomeRecord, OutcomeStatus, Reply,
    ReportRecord, ReportService, ReportShape, TokenResponse,
};

pub use health::{HealthRes, HealthService};

pub const PRIVATE_REPORT_PATH: &str = "/report-api/v1/private/report";
pub const OPENDATA_REPORT_PATH: &str = "/report-api/v1/opendata/report";
pub const SERVER_BATCH_PATH: &str = "/report-api/v1/server-batch";
pub const TOKEN_PATH: &str = "/token/";
pub const HEALTH_PATH: &str = "/health";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    report_service: ReportService,
}

impl AppState {
    pub fn new(report_service: ReportService) -> Self {
        Self { report_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, private_report, opendata_report, server_batch, token),
    components(schemas(
        HealthRes,
        ReportRecord,
        AdditionalInfo,
        BatchEnvelope,
        OutcomeRecord,
        OutcomeStatus,
        ErrorPayload,
        TokenResponse,
    ))
)]
struct ApiDoc;

/// Build the mock's router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(PRIVATE_REPORT_PATH, post(private_report))
        .route(OPENDATA_REPORT_PATH, post(opendata_report))
        .route(SERVER_BATCH_PATH, post(server_batch))
        .route(TOKEN_PATH, post(token))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/report-api/v1/private/report",
    request_body = [ReportRecord],
    responses(
        (status = 200, description = "One outcome per report, correlation ids echoed", body = [OutcomeRecord]),
        (status = 400, description = "Simulated rejection; any configured status is possible", body = ErrorPayload)
    )
)]
/// Private report submission.
///
/// Outcomes echo each report's correlation id.
#[axum::debug_handler]
async fn private_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    ingest(&state, ReportShape::PlainArray, &headers, &body)
}

#[utoipa::path(
    post,
    path = "/report-api/v1/opendata/report",
    request_body = [ReportRecord],
    responses(
        (status = 200, description = "One anonymous outcome per report", body = [OutcomeRecord]),
        (status = 400, description = "Simulated rejection; any configured status is possible", body = ErrorPayload)
    )
)]
/// Open-data report submission.
///
/// Reports are anonymized, so outcomes never carry a correlation id and can only be matched
/// by position.
#[axum::debug_handler]
async fn opendata_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    ingest(&state, ReportShape::AnonymizedArray, &headers, &body)
}

#[utoipa::path(
    post,
    path = "/report-api/v1/server-batch",
    request_body(
        content = String,
        description = "Compact `header.payload.signature` token; payload is base64url JSON BatchEnvelope",
        content_type = "application/jwt"
    ),
    responses(
        (status = 200, description = "One outcome per batch event, correlation ids echoed", body = [OutcomeRecord]),
        (status = 400, description = "Simulated rejection; any configured status is possible", body = ErrorPayload)
    )
)]
/// Signed server batch submission.
///
/// The token's signature is not verified.
#[axum::debug_handler]
async fn server_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    ingest(&state, ReportShape::SignedBatch, &headers, &body)
}

#[utoipa::path(
    post,
    path = "/token/",
    responses(
        (status = 200, description = "Canned bearer token", body = TokenResponse)
    )
)]
/// OAuth token stub. Request body and simulated status are ignored.
#[axum::debug_handler]
async fn token() -> Json<TokenResponse> {
    Json(TokenResponse::canned())
}

fn ingest(state: &AppState, shape: ReportShape, headers: &HeaderMap, body: &[u8]) -> Response {
    tracing::debug!("handling {} with headers {:?}", shape.label(), headers);

    // Per-request generator: nothing random is shared between concurrent requests.
    let mut rng = StdRng::from_entropy();
    reply_response(state.report_service.handle(shape, body, &mut rng))
}

fn reply_response(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or_else(|e| {
        tracing::error!("cannot emit simulated status {}: {}", reply.status, e);
        StatusCode::INTERNAL_SERVER_ERROR
    });
    (status, Json(reply.body)).into_response()
}
