use job_board::board::accounts::AccountService;
use job_board::board::applicants::ApplicantLifecycleService;
use job_board::board::jobs::JobBoardService;
use job_board::board::{DashboardService, DocumentStore, Email};
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every domain service, all sharing one document store.
pub(crate) struct BoardServices {
    pub(crate) jobs: Arc<JobBoardService<DocumentStore>>,
    pub(crate) accounts: Arc<AccountService<DocumentStore>>,
    pub(crate) applicants: Arc<ApplicantLifecycleService<DocumentStore>>,
    pub(crate) dashboard: Arc<DashboardService<DocumentStore, DocumentStore>>,
}

impl BoardServices {
    pub(crate) fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            jobs: Arc::new(JobBoardService::new(store.clone())),
            accounts: Arc::new(AccountService::new(store.clone())),
            applicants: Arc::new(ApplicantLifecycleService::new(store.clone())),
            dashboard: Arc::new(DashboardService::new(store.clone(), store)),
        }
    }
}

/// Opens the snapshot-backed store when a path is configured, otherwise an in-memory one.
pub(crate) fn open_store(data_path: Option<&Path>) -> Result<Arc<DocumentStore>, AppError> {
    match data_path {
        Some(path) => {
            let store = DocumentStore::open(path)?;
            info!(path = %path.display(), "using persistent document store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("no data path configured; records are kept in memory only");
            Ok(Arc::new(DocumentStore::in_memory()))
        }
    }
}

/// Loads configuration for a one-shot command and installs logging from it.
pub(crate) fn load_command_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    Ok(config)
}

pub(crate) fn parse_email(raw: &str) -> Result<Email, String> {
    Email::parse(raw).ok_or_else(|| format!("'{raw}' is not an e-mail address"))
}
