use crate::cli::ServeArgs;
use crate::infra::{load_records, AppState, InMemoryKycStore, LogNotifier};
use crate::routes::with_review_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kyc_review::config::AppConfig;
use kyc_review::error::AppError;
use kyc_review::review::ReviewService;
use kyc_review::telemetry;
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

    let records = match args.records.take() {
        Some(path) => load_records(&path)?,
        None => Vec::new(),
    };
    let seeded = records.len();
    let store = Arc::new(InMemoryKycStore::seeded(records));
    let notifier = Arc::new(LogNotifier);
    let review_service = Arc::new(ReviewService::new(store));

    let app = with_review_routes(review_service, notifier)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, seeded, "kyc review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
