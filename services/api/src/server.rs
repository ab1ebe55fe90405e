use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryChatRepository, InMemoryIncidentRepository};
use crate::routes::{with_dashboard_routes, Services};
use crate::seed::seed_demo_data;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use poliz::chat::ChatService;
use poliz::config::AppConfig;
use poliz::error::AppError;
use poliz::incidents::{IncidentCsvImporter, IncidentService};
use poliz::performance::PerformanceService;
use poliz::telemetry;
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

    let incident_repository = Arc::new(InMemoryIncidentRepository::default());
    let chat_repository = Arc::new(InMemoryChatRepository::default());
    let incident_service = Arc::new(IncidentService::new(
        incident_repository.clone(),
        config.scoring.clone(),
    ));

    if let Some(path) = args.seed_csv.take() {
        let reports = IncidentCsvImporter::from_path(&path)?;
        let imported = reports.len();
        for report in reports {
            incident_service.add(report)?;
        }
        info!(path = %path.display(), imported, "incidents imported from csv");
    }
    seed_demo_data(
        &incident_service,
        chat_repository.as_ref(),
        Local::now().date_naive(),
    )?;

    let services = Services {
        incidents: incident_service,
        chats: Arc::new(ChatService::new(chat_repository.clone())),
        performance: Arc::new(PerformanceService::new(
            chat_repository,
            incident_repository,
        )),
    };

    let app = with_dashboard_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "incident dashboard backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
