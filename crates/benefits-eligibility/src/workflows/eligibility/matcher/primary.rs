use serde::Serialize;

use super::super::domain::{ApplicantFacts, Benefit};
use super::super::fpl::thresholds;
use crate::workflows::catalog::normalizer::{normalize_text, tokenize};

const MINIMUM_AGE: u8 = 3;

/// Gateway programs with their own eligibility formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryProgram {
    MediCal,
    Ihss,
    Ssi,
}

/// Why a primary program's formula fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimaryBasis {
    AlreadyReceiving,
    IncomeWithinLimit { limit: f64 },
    MediCalEligibleAndAge { minimum_age: u8 },
}

impl PrimaryBasis {
    pub fn describe(&self) -> String {
        match self {
            Self::AlreadyReceiving => "already receiving".to_string(),
            Self::IncomeWithinLimit { limit } => format!("income at or below {limit:.0}% FPL"),
            Self::MediCalEligibleAndAge { minimum_age } => {
                format!("Medi-Cal eligible and age {minimum_age}+")
            }
        }
    }
}

impl PrimaryProgram {
    pub const fn ordered() -> [Self; 3] {
        [Self::MediCal, Self::Ihss, Self::Ssi]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MediCal => "Medi-Cal",
            Self::Ihss => "IHSS (In-Home Supportive Services)",
            Self::Ssi => "SSI (Supplemental Security Income)",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            Self::MediCal => "Based on income and/or disability status.",
            Self::Ihss => "Requires Medi-Cal eligibility and functional need.",
            Self::Ssi => "Based on disability and financial need.",
        }
    }

    pub const fn benefit(self) -> Benefit {
        match self {
            Self::MediCal => Benefit::MediCal,
            Self::Ihss => Benefit::Ihss,
            Self::Ssi => Benefit::Ssi,
        }
    }

    /// Identifies a primary program from a catalog program name, word by word.
    pub fn from_program_name(name: &str) -> Option<Self> {
        let normalized = normalize_text(name);
        let tokens = tokenize(&normalized);
        let has_phrase = |phrase: &[&str]| tokens.windows(phrase.len()).any(|w| w == phrase);

        if tokens.contains(&"medi-cal") || has_phrase(&["medi", "cal"]) {
            Some(Self::MediCal)
        } else if tokens.contains(&"ihss") || has_phrase(&["in-home", "supportive", "services"])
        {
            Some(Self::Ihss)
        } else if tokens.contains(&"ssi") || has_phrase(&["supplemental", "security", "income"])
        {
            Some(Self::Ssi)
        } else {
            None
        }
    }

    /// Applies the program's formula; `None` means the formula did not fire.
    pub fn evaluate(self, facts: &ApplicantFacts, fpl_percentage: f64) -> Option<PrimaryBasis> {
        if facts.receives(self.benefit()) {
            return Some(PrimaryBasis::AlreadyReceiving);
        }

        match self {
            Self::MediCal => (fpl_percentage <= thresholds::MEDI_CAL).then_some(
                PrimaryBasis::IncomeWithinLimit {
                    limit: thresholds::MEDI_CAL,
                },
            ),
            Self::Ihss => {
                let medi_cal_eligible = Self::MediCal.evaluate(facts, fpl_percentage).is_some();
                (medi_cal_eligible && facts.minimum_age() >= MINIMUM_AGE).then_some(
                    PrimaryBasis::MediCalEligibleAndAge {
                        minimum_age: MINIMUM_AGE,
                    },
                )
            }
            Self::Ssi => (facts.minimum_age() >= MINIMUM_AGE
                && fpl_percentage <= thresholds::SSI)
                .then_some(PrimaryBasis::IncomeWithinLimit {
                    limit: thresholds::SSI,
                }),
        }
    }
}

/// Priority bucket rule: the program name mentions medi-cal, ihss or ssi.
pub fn is_priority_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    ["medi-cal", "ihss", "ssi"]
        .iter()
        .any(|needle| lowered.contains(needle))
}
