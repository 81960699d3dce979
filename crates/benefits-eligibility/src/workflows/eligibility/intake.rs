use std::collections::BTreeSet;

use tracing::warn;

use super::domain::{AgeGroup, ApplicantFacts, ApplicantSubmission, Benefit};

/// Validation errors raised before any matching runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("either age or age_group is required")]
    MissingAge,
    #[error("citizenship status is required")]
    MissingCitizenship,
    #[error("{field} must be a finite, non-negative amount (found {value})")]
    InvalidIncome { field: &'static str, value: f64 },
    #[error("unrecognized current benefit '{0}'")]
    UnknownBenefit(String),
}

/// Turns raw form answers into `ApplicantFacts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn facts_from_submission(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<ApplicantFacts, IntakeError> {
        let age_group = match (submission.age, submission.age_group) {
            (Some(age), declared) => {
                let derived = AgeGroup::from_age(age);
                if declared.is_some_and(|group| group != derived) {
                    warn!(
                        age,
                        declared = %declared.map(AgeGroup::label).unwrap_or_default(),
                        "age disagrees with age group; using age"
                    );
                }
                derived
            }
            (None, Some(group)) => group,
            (None, None) => return Err(IntakeError::MissingAge),
        };

        let citizenship = submission
            .citizenship
            .ok_or(IntakeError::MissingCitizenship)?;

        let household_income = validate_income("household_income", submission.household_income)?;
        let individual_income = submission
            .individual_income
            .map(|value| validate_income("individual_income", value))
            .transpose()?;

        let household_size = if submission.household_size == 0 {
            warn!("household size of zero clamped to one");
            1
        } else {
            submission.household_size
        };

        let current_benefits = submission
            .current_benefits
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse::<Benefit>()
                    .map_err(|_| IntakeError::UnknownBenefit(name.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(ApplicantFacts {
            age_group,
            age: submission.age,
            citizenship,
            employment: submission.employment,
            household_income,
            household_size,
            individual_income,
            disabled_children: submission.disabled_children,
            pregnant: submission.pregnant,
            veteran: submission.veteran,
            regional_center_client: submission.regional_center_client,
            current_benefits,
        })
    }
}

fn validate_income(field: &'static str, value: f64) -> Result<f64, IntakeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(IntakeError::InvalidIncome { field, value })
    }
}
