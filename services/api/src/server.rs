use crate::cli::ServeArgs;
use crate::infra::{seed_marketplace, AppState};
use crate::routes::with_marketplace_routes;
use asisten_kita::applications::ApplicationService;
use asisten_kita::config::AppConfig;
use asisten_kita::directory::WorkerDirectoryService;
use asisten_kita::error::AppError;
use asisten_kita::listings::JobBoardService;
use asisten_kita::store::MemoryStore;
use asisten_kita::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let store = Arc::new(MemoryStore::new());
    seed_marketplace(&store)?;

    let workers = Arc::new(WorkerDirectoryService::new(store.clone()));
    let listings = Arc::new(JobBoardService::new(store.clone()));
    let applications = Arc::new(ApplicationService::new(store.clone()));

    let app = with_marketplace_routes(workers, listings, applications)
        .layer(Extension(app_state))
        .layer(Extension(store))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "asistenkita marketplace api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
