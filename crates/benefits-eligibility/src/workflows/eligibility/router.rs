use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::ApplicantSubmission;
use super::intake::IntakeError;
use super::report::{EligibilitySummary, SummaryExport};
use super::service::EligibilityService;
use crate::workflows::catalog::{CatalogError, ProgramCatalog};

/// Evaluation payload: the applicant's answers plus an optional CSV catalog
/// that replaces the shared one for this request only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(flatten)]
    pub applicant: ApplicantSubmission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_csv: Option<String>,
}

/// Router builder exposing the catalog and evaluation endpoints.
pub fn eligibility_router(service: Arc<EligibilityService>) -> Router {
    Router::new()
        .route("/api/v1/programs", get(programs_handler))
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler))
        .route("/api/v1/eligibility/export", post(export_handler))
        .with_state(service)
}

pub(crate) async fn programs_handler(State(service): State<Arc<EligibilityService>>) -> Response {
    let catalog = service.catalog();
    let payload = json!({
        "count": catalog.len(),
        "programs": catalog,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<EligibilityService>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    with_summary(&service, request, |summary| {
        (StatusCode::OK, axum::Json(summary)).into_response()
    })
}

pub(crate) async fn export_handler(
    State(service): State<Arc<EligibilityService>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    with_summary(&service, request, |summary| {
        let export = SummaryExport::new(&summary);
        let disposition = format!("attachment; filename=\"{}\"", export.file_name());
        let body = export.render(Local::now().date_naive());
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response()
    })
}

fn with_summary<F>(service: &EligibilityService, request: EvaluationRequest, respond: F) -> Response
where
    F: FnOnce(EligibilitySummary<'_>) -> Response,
{
    let EvaluationRequest {
        applicant,
        catalog_csv,
    } = request;

    match catalog_csv {
        Some(csv) => {
            let catalog = match ProgramCatalog::from_reader(Cursor::new(csv.into_bytes())) {
                Ok(catalog) => catalog,
                Err(error) => return catalog_error_response(error),
            };
            match service.evaluate_against(applicant, &catalog) {
                Ok(summary) => respond(summary),
                Err(error) => intake_error_response(error),
            }
        }
        None => match service.evaluate(applicant) {
            Ok(summary) => respond(summary),
            Err(error) => intake_error_response(error),
        },
    }
}

fn intake_error_response(error: IntakeError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn catalog_error_response(error: CatalogError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}
