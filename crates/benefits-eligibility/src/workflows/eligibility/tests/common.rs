use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::catalog::{Program, ProgramCatalog};
use crate::workflows::eligibility::domain::{
    AgeGroup, ApplicantFacts, ApplicantSubmission, CitizenshipStatus,
};
use crate::workflows::eligibility::{
    EligibilityMatcher, EligibilityService, FplGuidelines, IntakeGuard,
};

pub(super) const CATALOG_CSV: &str = "\
Program Name,Administering Agency,Description,Application Link,Last Updated,Eligibility Criteria,Update Source URLs
Medi-Cal,OC Social Services Agency,Free or low-cost health coverage,https://benefitscal.com,2024-06-01,\"Low income households, FPL up to 138%\",https://www.dhcs.ca.gov
In-Home Supportive Services (IHSS),OC Social Services Agency,Paid in-home caregivers,https://www.ssa.ocgov.com/ihss,2024-06-01,Medi-Cal recipients with disabilities,
Supplemental Security Income (SSI),Social Security Administration,Monthly cash for disability and need,https://www.ssa.gov/ssi,2024-05-15,Disability and limited income,
Respite Care,Regional Center of Orange County,Short-term relief for family caregivers,https://www.rcocdd.com,2024-04-10,Regional Center clients,
CalFresh,OC Social Services Agency,Monthly food benefits,https://www.getcalfresh.org,2024-06-01,Income under 200% FPL,
WIC,OC Health Care Agency,Nutrition for pregnant people and young children,https://www.ocwic.org,2024-03-20,Pregnant individuals or children age 0-2,
Veterans Service Office,OC Community Resources,Help filing VA claims,https://www.ocvets.org,2024-02-01,Veterans and their dependents,
Cash Assistance Program for Immigrants,OC Social Services Agency,Cash aid for aged and disabled non-citizens,https://www.cdss.ca.gov/capi,2024-01-12,Non-citizens ineligible for SSI,
";

pub(super) fn catalog() -> ProgramCatalog {
    ProgramCatalog::from_reader(CATALOG_CSV.as_bytes()).expect("fixture catalog loads")
}

pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission {
        age_group: Some(AgeGroup::Youth),
        citizenship: Some(CitizenshipStatus::Citizen),
        household_income: 30_000.0,
        household_size: 4,
        ..ApplicantSubmission::default()
    }
}

/// An applicant no fixture program should match.
pub(super) fn unmatched_submission() -> ApplicantSubmission {
    ApplicantSubmission {
        age_group: Some(AgeGroup::Adult),
        citizenship: Some(CitizenshipStatus::Citizen),
        household_income: 250_000.0,
        household_size: 2,
        individual_income: Some(120_000.0),
        ..ApplicantSubmission::default()
    }
}

pub(super) fn facts(submission: ApplicantSubmission) -> ApplicantFacts {
    IntakeGuard
        .facts_from_submission(submission)
        .expect("fixture submission is valid")
}

pub(super) fn program(name: &str, criteria: &str) -> Program {
    Program::new(name, criteria)
}

pub(super) fn build_service(matcher: EligibilityMatcher) -> EligibilityService {
    EligibilityService::with_parts(Arc::new(catalog()), FplGuidelines::FY2024, matcher)
}

pub(super) fn names<'a>(matches: impl IntoIterator<Item = &'a Program>) -> Vec<&'a str> {
    matches
        .into_iter()
        .map(|program| program.name.as_str())
        .collect()
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
