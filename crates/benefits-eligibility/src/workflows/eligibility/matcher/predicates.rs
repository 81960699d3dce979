use serde::Serialize;

use super::super::domain::{ApplicantFacts, Benefit, EmploymentStatus};
use super::super::fpl::thresholds;
use crate::workflows::catalog::{CriteriaTag, CriteriaTags};

/// Individual annual income below which an income-tagged program qualifies
/// regardless of household FPL.
pub const INDIVIDUAL_INCOME_CEILING: f64 = 25_000.0;

/// Generic criteria checks, listed in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaPredicate {
    RegionalCenter,
    Ssi,
    Snap,
    MediCal,
    Pregnancy,
    Veteran,
    Disability,
    Employment,
    Citizenship,
    Income,
    AgeBracket,
}

impl CriteriaPredicate {
    pub const ORDERED: [Self; 11] = [
        Self::RegionalCenter,
        Self::Ssi,
        Self::Snap,
        Self::MediCal,
        Self::Pregnancy,
        Self::Veteran,
        Self::Disability,
        Self::Employment,
        Self::Citizenship,
        Self::Income,
        Self::AgeBracket,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RegionalCenter => "Regional Center client",
            Self::Ssi => "SSI recipient",
            Self::Snap => "SNAP recipient",
            Self::MediCal => "Medi-Cal recipient",
            Self::Pregnancy => "pregnancy",
            Self::Veteran => "veteran status",
            Self::Disability => "disability",
            Self::Employment => "employment status",
            Self::Citizenship => "citizenship status",
            Self::Income => "income within limits",
            Self::AgeBracket => "age group",
        }
    }

    pub fn fires(self, tags: &CriteriaTags, facts: &ApplicantFacts, fpl_percentage: f64) -> bool {
        match self {
            Self::RegionalCenter => {
                tags.contains(CriteriaTag::RegionalCenter) && facts.regional_center_client
            }
            Self::Ssi => tags.contains(CriteriaTag::Ssi) && facts.receives(Benefit::Ssi),
            Self::Snap => tags.contains(CriteriaTag::Snap) && facts.receives(Benefit::Snap),
            Self::MediCal => {
                tags.contains(CriteriaTag::MediCal) && facts.receives(Benefit::MediCal)
            }
            Self::Pregnancy => tags.contains(CriteriaTag::Pregnancy) && facts.pregnant,
            Self::Veteran => tags.contains(CriteriaTag::Veteran) && facts.veteran,
            Self::Disability => {
                tags.contains(CriteriaTag::Disability) && facts.has_disability_signal()
            }
            Self::Employment => {
                matches!(
                    facts.employment,
                    EmploymentStatus::Unemployed
                        | EmploymentStatus::Student
                        | EmploymentStatus::Disabled
                ) && tags.contains(CriteriaTag::Employment(facts.employment))
            }
            Self::Citizenship => tags.contains(CriteriaTag::Citizenship(facts.citizenship)),
            Self::Income => {
                tags.contains(CriteriaTag::Income)
                    && (fpl_percentage <= thresholds::INCOME_CEILING
                        || facts
                            .individual_income
                            .is_some_and(|income| income < INDIVIDUAL_INCOME_CEILING))
            }
            Self::AgeBracket => tags.contains(CriteriaTag::AgeBracket(facts.age_group)),
        }
    }
}

/// First predicate in `ORDERED` that fires; later ones are not evaluated.
pub fn first_match(
    tags: &CriteriaTags,
    facts: &ApplicantFacts,
    fpl_percentage: f64,
) -> Option<CriteriaPredicate> {
    CriteriaPredicate::ORDERED
        .into_iter()
        .find(|predicate| predicate.fires(tags, facts, fpl_percentage))
}
