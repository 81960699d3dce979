//! Eligibility workflow: intake validation, FPL computation, criteria matching,
//! and the reports built from a match.

pub mod domain;
mod fpl;
mod intake;
pub mod matcher;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AgeGroup, ApplicantFacts, ApplicantSubmission, Benefit, CitizenshipStatus, EmploymentStatus,
};
pub use fpl::{fpl_percentage, thresholds, FplGuidelines, ADDITIONAL_PER_PERSON, BASE_FPL};
pub use intake::{IntakeError, IntakeGuard};
pub use matcher::{
    CriteriaPredicate, EligibilityMatcher, MatchReason, MatchResult, PrimaryBasis,
    PrimaryProgram, ProgramMatch,
};
pub use report::{EligibilitySummary, SummaryExport};
pub use router::eligibility_router;
pub use service::EligibilityService;
