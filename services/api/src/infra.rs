use benefits_eligibility::config::EligibilityConfig;
use benefits_eligibility::error::AppError;
use benefits_eligibility::workflows::catalog::ProgramCatalog;
use benefits_eligibility::workflows::eligibility::{EligibilityMatcher, EligibilityService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the catalog named on the command line, falling back to the configured path.
pub(crate) fn load_catalog(
    config: &EligibilityConfig,
    catalog_override: Option<PathBuf>,
) -> Result<ProgramCatalog, AppError> {
    let path = catalog_override.unwrap_or_else(|| config.catalog_path.clone());
    Ok(ProgramCatalog::from_path(path)?)
}

pub(crate) fn eligibility_service(
    config: &EligibilityConfig,
    catalog: ProgramCatalog,
    primary_overrides: bool,
) -> EligibilityService {
    EligibilityService::with_parts(
        Arc::new(catalog),
        config.fpl,
        EligibilityMatcher::new(primary_overrides),
    )
}
