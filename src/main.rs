use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use pcm_core::{MockConfig, ReportService, resolve_expected_status};

const DEFAULT_LOG_FILTER: &str = "pcm_mock=info,pcm_core=info,api_rest=info";

/// Mock of the PCM report-ingestion API for testing report-submission clients.
#[derive(Parser)]
#[command(name = "pcm-mock")]
#[command(about = "Mock PCM report API server")]
struct Cli {
    /// HTTP status every ingestion request answers with (200 and 207 return outcomes; anything
    /// else returns an error body). Missing or invalid values mean 200.
    #[arg(allow_hyphen_values = true)]
    expected_status: Option<String>,

    /// Address to listen on
    #[arg(long, default_value = "localhost:8090")]
    addr: String,
}

/// Main entry point for the PCM mock server
///
/// Resolves the simulated status once from the command line, then serves the report ingestion
/// endpoints, the token stub, the health probe and Swagger UI.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the listen address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            // RUST_LOG=pcm_core=debug,api_rest=debug shows headers, decoded payloads and bodies.
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER))?,
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let expected_status = resolve_expected_status(cli.expected_status.as_deref());
    let cfg = Arc::new(MockConfig::new(expected_status));
    let app = api_rest::router(AppState::new(ReportService::new(cfg)));

    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    tracing::info!(
        "++ Started PCM mock server on {} (expected status {})",
        listener.local_addr()?,
        expected_status
    );
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_status_is_taken_as_a_value() {
        let cli = Cli::try_parse_from(["pcm-mock", "-1"]).unwrap();

        assert_eq!(cli.expected_status.as_deref(), Some("-1"));
        assert_eq!(resolve_expected_status(cli.expected_status.as_deref()).code(), 200);
    }

    #[test]
    fn addr_flag_still_parses_after_status() {
        let cli = Cli::try_parse_from(["pcm-mock", "207", "--addr", "0.0.0.0:9000"]).unwrap();

        assert_eq!(cli.expected_status.as_deref(), Some("207"));
        assert_eq!(cli.addr, "0.0.0.0:9000");
    }
}
