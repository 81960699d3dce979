mod predicates;
mod primary;

pub use predicates::{first_match, CriteriaPredicate, INDIVIDUAL_INCOME_CEILING};
pub use primary::{is_priority_name, PrimaryBasis, PrimaryProgram};

use serde::Serialize;

use super::domain::ApplicantFacts;
use crate::workflows::catalog::Program;

/// What made a program match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchReason {
    Primary {
        program: PrimaryProgram,
        basis: PrimaryBasis,
    },
    Criteria {
        predicate: CriteriaPredicate,
    },
}

impl MatchReason {
    pub fn describe(&self) -> String {
        match self {
            Self::Primary { program, basis } => {
                format!("{}: {}", program.label(), basis.describe())
            }
            Self::Criteria { predicate } => format!("criteria: {}", predicate.label()),
        }
    }
}

/// A catalog program that matched, borrowed unmodified from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgramMatch<'a> {
    pub program: &'a Program,
    pub reason: MatchReason,
}

/// Matches split into the priority bucket and everything else, each in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub priority: Vec<ProgramMatch<'a>>,
    pub other: Vec<ProgramMatch<'a>>,
}

impl<'a> MatchResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.other.is_empty()
    }

    pub fn len(&self) -> usize {
        self.priority.len() + self.other.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgramMatch<'a>> {
        self.priority.iter().chain(self.other.iter())
    }
}

/// Scans every program against one applicant. Holds no state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityMatcher {
    primary_overrides: bool,
}

impl Default for EligibilityMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EligibilityMatcher {
    pub fn new(primary_overrides: bool) -> Self {
        Self { primary_overrides }
    }

    /// Keyword criteria only, without the Medi-Cal/IHSS/SSI formulas.
    pub fn baseline() -> Self {
        Self::new(false)
    }

    pub fn primary_overrides(&self) -> bool {
        self.primary_overrides
    }

    /// The primary formula is tried first and wins when it fires; otherwise the
    /// generic criteria predicates run.
    pub fn evaluate_program(
        &self,
        program: &Program,
        facts: &ApplicantFacts,
        fpl_percentage: f64,
    ) -> Option<MatchReason> {
        if self.primary_overrides {
            let primary = PrimaryProgram::from_program_name(&program.name).and_then(|kind| {
                kind.evaluate(facts, fpl_percentage)
                    .map(|basis| MatchReason::Primary {
                        program: kind,
                        basis,
                    })
            });
            if primary.is_some() {
                return primary;
            }
        }

        first_match(&program.tags, facts, fpl_percentage)
            .map(|predicate| MatchReason::Criteria { predicate })
    }

    pub fn match_programs<'a>(
        &self,
        facts: &ApplicantFacts,
        fpl_percentage: f64,
        programs: &'a [Program],
    ) -> MatchResult<'a> {
        let mut result = MatchResult::default();

        for program in programs {
            let Some(reason) = self.evaluate_program(program, facts, fpl_percentage) else {
                continue;
            };

            let matched = ProgramMatch { program, reason };
            if is_priority_name(&program.name) {
                result.priority.push(matched);
            } else {
                result.other.push(matched);
            }
        }

        result
    }
}
