use super::super::domain::{ApplicantFacts, Benefit};
use super::super::fpl::{thresholds, FplGuidelines};
use super::super::matcher::{EligibilityMatcher, MatchResult, PrimaryProgram};
use super::views::{BenefitSignalView, PrimaryProgramView, SignalBasis};
use crate::workflows::catalog::Program;
use serde::Serialize;

const RECEIVING_NOTE: &str = "Already receiving or may qualify based on your inputs.";

/// Everything one evaluation produces, ready to render or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilitySummary<'a> {
    pub facts: ApplicantFacts,
    pub fpl_percentage: f64,
    pub fpl_threshold: f64,
    pub primary_programs: Vec<PrimaryProgramView>,
    pub matches: MatchResult<'a>,
    pub other_signals: Vec<BenefitSignalView>,
}

impl<'a> EligibilitySummary<'a> {
    pub fn build(
        facts: ApplicantFacts,
        guidelines: &FplGuidelines,
        matcher: &EligibilityMatcher,
        programs: &'a [Program],
    ) -> Self {
        let fpl_percentage = guidelines.percentage(facts.household_income, facts.household_size);
        let fpl_threshold = guidelines.threshold(facts.household_size);
        let matches = matcher.match_programs(&facts, fpl_percentage, programs);
        let primary_programs = primary_program_views(&facts, fpl_percentage);
        let other_signals = benefit_signals(&facts, fpl_percentage);

        Self {
            facts,
            fpl_percentage,
            fpl_threshold,
            primary_programs,
            matches,
            other_signals,
        }
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Names from the non-priority bucket with repeats removed, first occurrence kept.
    pub fn other_program_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for matched in &self.matches.other {
            let name = matched.program.name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

fn primary_program_views(facts: &ApplicantFacts, fpl_percentage: f64) -> Vec<PrimaryProgramView> {
    PrimaryProgram::ordered()
        .into_iter()
        .map(|program| {
            let basis = program.evaluate(facts, fpl_percentage);
            PrimaryProgramView {
                program,
                label: program.label(),
                eligible: basis.is_some(),
                basis,
                guidance: program.guidance(),
            }
        })
        .collect()
}

fn benefit_signals(facts: &ApplicantFacts, fpl_percentage: f64) -> Vec<BenefitSignalView> {
    let mut signals: Vec<BenefitSignalView> = facts
        .current_benefits
        .iter()
        .filter(|benefit| !benefit.is_primary())
        .map(|benefit| match benefit {
            Benefit::InstitutionalDeeming => BenefitSignalView {
                name: "Institutional Deeming Waiver",
                basis: SignalBasis::AlreadyReceiving,
                note: "May allow Medi-Cal eligibility regardless of parental income.",
            },
            other => BenefitSignalView {
                name: other.label(),
                basis: SignalBasis::AlreadyReceiving,
                note: RECEIVING_NOTE,
            },
        })
        .collect();

    if fpl_percentage <= thresholds::WIC && !facts.receives(Benefit::Wic) {
        signals.push(BenefitSignalView {
            name: "WIC",
            basis: SignalBasis::IncomeWithinLimit {
                limit: thresholds::WIC,
            },
            note: "For children under 5 and pregnant individuals in low-income households.",
        });
    }
    if fpl_percentage <= thresholds::CALFRESH && !facts.receives(Benefit::Snap) {
        signals.push(BenefitSignalView {
            name: "CalFresh (SNAP)",
            basis: SignalBasis::IncomeWithinLimit {
                limit: thresholds::CALFRESH,
            },
            note: "Food assistance for low-income individuals and families.",
        });
    }

    signals
}
