use super::common::*;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::eligibility::router::{evaluate_handler, EvaluationRequest};
use crate::workflows::eligibility::{eligibility_router, EligibilityMatcher};

fn router() -> axum::Router {
    eligibility_router(Arc::new(build_service(EligibilityMatcher::default())))
}

fn post_json(uri: &str, payload: &Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn evaluate_handler_returns_unprocessable_for_intake_error() {
    let service = Arc::new(build_service(EligibilityMatcher::default()));
    let request = EvaluationRequest {
        applicant: crate::workflows::eligibility::ApplicantSubmission {
            household_income: -5.0,
            ..submission()
        },
        catalog_csv: None,
    };

    let response = evaluate_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("household_income"));
}

#[tokio::test]
async fn programs_route_lists_catalog_in_order() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/programs")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 8);
    assert_eq!(body["programs"][0]["name"], "Medi-Cal");
    assert_eq!(body["programs"][3]["tags"], json!(["regional_center"]));
}

#[tokio::test]
async fn evaluate_route_returns_partitioned_matches() {
    let payload = json!({
        "age_group": "3-21",
        "citizenship": "yes",
        "household_income": 30000,
        "household_size": 4
    });

    let response = router()
        .oneshot(post_json("/api/v1/eligibility/evaluate", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["matches"]["priority"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["matches"]["other"][0]["program"]["name"], "CalFresh");
    assert_eq!(body["matches"]["priority"][0]["reason"]["kind"], "primary");
    assert_eq!(body["primary_programs"][0]["eligible"], true);
}

#[tokio::test]
async fn evaluate_route_rejects_malformed_request_catalog() {
    let payload = json!({
        "age_group": "22+",
        "citizenship": "no",
        "household_income": 12000,
        "catalog_csv": "Title,Eligibility Criteria\nCAPI,Immigrants\n"
    });

    let response = router()
        .oneshot(post_json("/api/v1/eligibility/evaluate", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn evaluate_route_uses_request_catalog_when_supplied() {
    let payload = json!({
        "age_group": "22+",
        "citizenship": "no",
        "household_income": 12000,
        "catalog_csv": "Program Name,Eligibility Criteria\nCAPI,Immigrants and non-citizens\n"
    });

    let response = router()
        .oneshot(post_json("/api/v1/eligibility/evaluate", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["matches"]["other"][0]["program"]["name"], "CAPI");
    assert_eq!(
        body["matches"]["other"][0]["reason"]["predicate"],
        "citizenship"
    );
}

#[tokio::test]
async fn export_route_returns_plain_text_attachment() {
    let payload = json!({
        "age_group": "3-21",
        "citizenship": "yes",
        "household_income": 30000,
        "household_size": 4
    });

    let response = router()
        .oneshot(post_json("/api/v1/eligibility/export", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"eligibility_summary.txt\""
    );
    let text = String::from_utf8(read_body(response).await).expect("utf-8 body");
    assert!(text.contains("Estimated FPL: 96.2%"));
}
