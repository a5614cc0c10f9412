use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryMailbox, InMemoryProposalStore, InMemoryRfpRepository,
    InMemoryVendorDirectory, LoggingMailSender,
};
use crate::routes::with_procurement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use procure_ai::config::AppConfig;
use procure_ai::error::AppError;
use procure_ai::telemetry;
use procure_ai::workflows::procurement::{
    CompletionGateway, HttpCompletionClient, ProcurementService,
};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let generative = build_gateway(&config);

    let service = Arc::new(ProcurementService::new(
        Arc::new(InMemoryRfpRepository::default()),
        Arc::new(InMemoryVendorDirectory::default()),
        Arc::new(InMemoryProposalStore::default()),
        Box::new(LoggingMailSender::default()),
        Box::new(InMemoryMailbox::default()),
        generative,
    ));

    let app = with_procurement_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "procurement workflow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the completion gateway when configured; any construction failure
/// degrades to the deterministic extractors instead of refusing to start.
fn build_gateway(config: &AppConfig) -> Option<Arc<dyn CompletionGateway>> {
    match HttpCompletionClient::from_config(&config.generative) {
        Ok(Some(client)) => Some(Arc::new(client)),
        Ok(None) => {
            info!("generative service not configured; running deterministic extractors only");
            None
        }
        Err(err) => {
            warn!(error = %err, "completion client unavailable; running deterministic extractors only");
            None
        }
    }
}
