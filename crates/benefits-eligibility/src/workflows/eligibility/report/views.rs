use super::super::matcher::{PrimaryBasis, PrimaryProgram};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PrimaryProgramView {
    pub program: PrimaryProgram,
    pub label: &'static str,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<PrimaryBasis>,
    pub guidance: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalBasis {
    AlreadyReceiving,
    IncomeWithinLimit { limit: f64 },
}

/// A benefit worth following up on that is not tied to a catalog row.
#[derive(Debug, Clone, Serialize)]
pub struct BenefitSignalView {
    pub name: &'static str,
    pub basis: SignalBasis,
    pub note: &'static str,
}
