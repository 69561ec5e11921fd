use crate::cli::ServeArgs;
use crate::infra::{build_catalog, AppState};
use crate::routes::with_ops_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_hub::catalog::CatalogState;
use estate_hub::config::AppConfig;
use estate_hub::error::AppError;
use estate_hub::query::QueryClient;
use estate_hub::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = build_catalog(&config.catalog);
    let state = CatalogState::new(catalog, QueryClient::global().clone());

    let app = with_ops_routes(state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded = config.catalog.seed,
        "estate hub catalog ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
