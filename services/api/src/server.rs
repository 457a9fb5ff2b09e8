use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use permit_tracker::config::AppConfig;
use permit_tracker::deadlines::SystemClock;
use permit_tracker::error::AppError;
use permit_tracker::properties::{InMemoryPropertyRepository, PropertyService};
use permit_tracker::telemetry;
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

    let repository = Arc::new(InMemoryPropertyRepository::default());
    let property_service = Arc::new(PropertyService::new(
        repository,
        SystemClock,
        config.deadlines,
    ));

    let app = with_service_routes(property_service)
        .layer(Extension(config.deadlines))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        abandonment_days = config.deadlines.abandonment_days,
        permit_validity_days = config.deadlines.permit_validity_days,
        "permit deadline tracker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
