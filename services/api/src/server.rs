use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_readiness_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use readiness_core::barriers::SuggestionRules;
use readiness_core::config::AppConfig;
use readiness_core::error::AppError;
use readiness_core::sessions::SessionService;
use readiness_core::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let catalog = config.scoring.catalog()?;
    let rules = SuggestionRules::standard();
    rules.verify(&catalog)?;
    info!(
        barriers = catalog.len(),
        custom_catalog = config.scoring.barrier_catalog.is_some(),
        custom_weights = config.scoring.legacy_weights.is_some(),
        "barrier bank loaded"
    );

    let repository = Arc::new(InMemorySessionRepository::default());
    let session_service = Arc::new(SessionService::new(
        repository,
        config.scoring.engine(),
        catalog,
        rules,
    )?);

    let app = with_readiness_routes(session_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "readiness coaching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
