use crate::cli::ServeArgs;
use crate::infra::{eligibility_service, load_catalog, AppState};
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use benefits_eligibility::config::AppConfig;
use benefits_eligibility::error::AppError;
use benefits_eligibility::telemetry;
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

    let catalog = load_catalog(&config.eligibility, args.catalog.take())?;
    let service = Arc::new(eligibility_service(
        &config.eligibility,
        catalog,
        config.eligibility.primary_overrides,
    ));
    let programs = service.catalog().len();

    let app = with_eligibility_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        programs,
        primary_overrides = config.eligibility.primary_overrides,
        "benefits eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
