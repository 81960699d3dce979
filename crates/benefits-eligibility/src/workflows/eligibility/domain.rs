use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Age bands used by program criteria and by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-2", alias = "age 0-2")]
    Infant,
    #[serde(rename = "3-21", alias = "age 3-21")]
    Youth,
    #[serde(rename = "22+", alias = "age 22+")]
    Adult,
}

impl AgeGroup {
    pub const fn ordered() -> [Self; 3] {
        [Self::Infant, Self::Youth, Self::Adult]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Infant => "0-2",
            Self::Youth => "3-21",
            Self::Adult => "22+",
        }
    }

    pub const fn from_age(age: u8) -> Self {
        match age {
            0..=2 => Self::Infant,
            3..=21 => Self::Youth,
            _ => Self::Adult,
        }
    }

    /// Youngest age inside the band.
    pub const fn minimum_age(self) -> u8 {
        match self {
            Self::Infant => 0,
            Self::Youth => 3,
            Self::Adult => 22,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim().to_ascii_lowercase();
        let band = trimmed.strip_prefix("age").unwrap_or(&trimmed).trim();
        Self::ordered()
            .into_iter()
            .find(|group| group.label() == band)
            .ok_or_else(|| format!("unknown age group '{raw}' (expected 0-2, 3-21 or 22+)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenshipStatus {
    #[serde(alias = "yes", alias = "us_citizen")]
    Citizen,
    #[serde(alias = "no", alias = "non-citizen", alias = "noncitizen")]
    NonCitizen,
}

impl CitizenshipStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Citizen => "U.S. citizen",
            Self::NonCitizen => "Non-citizen",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::NonCitizen => "non_citizen",
        }
    }
}

impl FromStr for CitizenshipStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "citizen" | "us_citizen" | "u.s. citizen" => Ok(Self::Citizen),
            "no" | "n" | "non_citizen" | "non-citizen" | "noncitizen" => Ok(Self::NonCitizen),
            _ => Err(format!("unknown citizenship status '{raw}'")),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    Student,
    Disabled,
    #[default]
    NotApplicable,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Employed => "Employed",
            Self::Unemployed => "Unemployed",
            Self::Student => "Student",
            Self::Disabled => "Disabled",
            Self::NotApplicable => "Not applicable",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Employed => "employed",
            Self::Unemployed => "unemployed",
            Self::Student => "student",
            Self::Disabled => "disabled",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "employed" | "yes" => Ok(Self::Employed),
            "unemployed" | "no" => Ok(Self::Unemployed),
            "student" => Ok(Self::Student),
            "disabled" => Ok(Self::Disabled),
            "not_applicable" | "n/a" | "none" => Ok(Self::NotApplicable),
            _ => Err(format!("unknown employment status '{raw}'")),
        }
    }
}

/// Benefits an applicant may already be receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Benefit {
    Ssi,
    Ssdi,
    Snap,
    MediCal,
    Ihss,
    Wic,
    FirstStart,
    FirstStartTransition,
    InstitutionalDeeming,
}

impl Benefit {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Ssi,
            Self::Ssdi,
            Self::Snap,
            Self::MediCal,
            Self::Ihss,
            Self::Wic,
            Self::FirstStart,
            Self::FirstStartTransition,
            Self::InstitutionalDeeming,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ssi => "SSI",
            Self::Ssdi => "SSDI",
            Self::Snap => "SNAP",
            Self::MediCal => "Medi-Cal",
            Self::Ihss => "IHSS",
            Self::Wic => "WIC",
            Self::FirstStart => "First Start",
            Self::FirstStartTransition => "First Start Transition",
            Self::InstitutionalDeeming => "Institutional Deeming",
        }
    }

    /// Medi-Cal, IHSS and SSI are reported in their own section.
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::MediCal | Self::Ihss | Self::Ssi)
    }
}

impl fmt::Display for Benefit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Benefit {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        if wanted.eq_ignore_ascii_case("calfresh") {
            return Ok(Self::Snap);
        }

        Self::ordered()
            .into_iter()
            .find(|benefit| benefit.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown benefit '{raw}'"))
    }
}

impl Serialize for Benefit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Benefit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalized answers for one evaluation. Built by the intake guard, which
/// guarantees `household_size >= 1` and non-negative incomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantFacts {
    pub age_group: AgeGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    pub citizenship: CitizenshipStatus,
    pub employment: EmploymentStatus,
    pub household_income: f64,
    pub household_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_income: Option<f64>,
    pub disabled_children: u32,
    pub pregnant: bool,
    pub veteran: bool,
    pub regional_center_client: bool,
    pub current_benefits: BTreeSet<Benefit>,
}

impl ApplicantFacts {
    pub fn receives(&self, benefit: Benefit) -> bool {
        self.current_benefits.contains(&benefit)
    }

    /// Exact age when reported, otherwise the youngest age of the band.
    pub fn minimum_age(&self) -> u8 {
        self.age.unwrap_or_else(|| self.age_group.minimum_age())
    }

    pub fn has_disability_signal(&self) -> bool {
        self.disabled_children > 0 || self.employment == EmploymentStatus::Disabled
    }
}

/// Raw form answers as they arrive from the CLI or HTTP surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub citizenship: Option<CitizenshipStatus>,
    #[serde(default)]
    pub employment: EmploymentStatus,
    #[serde(default)]
    pub household_income: f64,
    #[serde(default = "default_household_size")]
    pub household_size: u32,
    #[serde(default)]
    pub individual_income: Option<f64>,
    #[serde(default)]
    pub disabled_children: u32,
    #[serde(default)]
    pub pregnant: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub regional_center_client: bool,
    #[serde(default)]
    pub current_benefits: Vec<String>,
}

fn default_household_size() -> u32 {
    1
}
