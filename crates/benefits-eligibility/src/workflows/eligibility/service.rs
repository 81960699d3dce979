use std::sync::Arc;

use tracing::debug;

use super::domain::{ApplicantFacts, ApplicantSubmission};
use super::fpl::FplGuidelines;
use super::intake::{IntakeError, IntakeGuard};
use super::matcher::EligibilityMatcher;
use super::report::EligibilitySummary;
use crate::config::EligibilityConfig;
use crate::workflows::catalog::ProgramCatalog;

/// Service composing the intake guard, FPL guidelines, and matcher over a shared catalog.
#[derive(Debug, Clone)]
pub struct EligibilityService {
    catalog: Arc<ProgramCatalog>,
    guard: IntakeGuard,
    guidelines: FplGuidelines,
    matcher: EligibilityMatcher,
}

impl EligibilityService {
    pub fn new(catalog: Arc<ProgramCatalog>, config: &EligibilityConfig) -> Self {
        Self::with_parts(
            catalog,
            config.fpl,
            EligibilityMatcher::new(config.primary_overrides),
        )
    }

    pub fn with_parts(
        catalog: Arc<ProgramCatalog>,
        guidelines: FplGuidelines,
        matcher: EligibilityMatcher,
    ) -> Self {
        Self {
            catalog,
            guard: IntakeGuard,
            guidelines,
            matcher,
        }
    }

    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    pub fn guidelines(&self) -> &FplGuidelines {
        &self.guidelines
    }

    /// Validate raw answers and evaluate them against the shared catalog.
    pub fn evaluate(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<EligibilitySummary<'_>, IntakeError> {
        self.evaluate_against(submission, &self.catalog)
    }

    /// Evaluate against a catalog supplied with the request instead of the shared one.
    pub fn evaluate_against<'c>(
        &self,
        submission: ApplicantSubmission,
        catalog: &'c ProgramCatalog,
    ) -> Result<EligibilitySummary<'c>, IntakeError> {
        let facts = self.guard.facts_from_submission(submission)?;
        Ok(self.summarize(facts, catalog))
    }

    /// Evaluate facts that were already validated.
    pub fn evaluate_facts(&self, facts: ApplicantFacts) -> EligibilitySummary<'_> {
        self.summarize(facts, &self.catalog)
    }

    fn summarize<'c>(
        &self,
        facts: ApplicantFacts,
        catalog: &'c ProgramCatalog,
    ) -> EligibilitySummary<'c> {
        let summary =
            EligibilitySummary::build(facts, &self.guidelines, &self.matcher, catalog.programs());
        debug!(
            fpl_percentage = summary.fpl_percentage,
            priority = summary.matches.priority.len(),
            other = summary.matches.other.len(),
            programs = catalog.len(),
            "eligibility evaluated"
        );
        summary
    }
}
