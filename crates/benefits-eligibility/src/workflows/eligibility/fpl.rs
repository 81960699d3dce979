use serde::{Deserialize, Serialize};

/// 2024 federal poverty guideline for a household of one.
pub const BASE_FPL: f64 = 15_060.0;
/// 2024 guideline increment for each additional household member.
pub const ADDITIONAL_PER_PERSON: f64 = 5_380.0;

/// Program cutoffs expressed as a percentage of FPL.
pub mod thresholds {
    pub const SSI: f64 = 100.0;
    pub const MEDI_CAL: f64 = 138.0;
    pub const WIC: f64 = 185.0;
    pub const CALFRESH: f64 = 200.0;
    /// Blanket ceiling for programs whose criteria only mention income or FPL.
    pub const INCOME_CEILING: f64 = 400.0;
}

/// Poverty guideline figures, overridable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FplGuidelines {
    pub base: f64,
    pub additional_per_person: f64,
}

impl FplGuidelines {
    pub const FY2024: Self = Self {
        base: BASE_FPL,
        additional_per_person: ADDITIONAL_PER_PERSON,
    };

    /// Annual income at 100% FPL. A household size of zero is treated as one.
    pub fn threshold(&self, household_size: u32) -> f64 {
        let additional_members = household_size.max(1) - 1;
        self.base + self.additional_per_person * f64::from(additional_members)
    }

    /// Household income as a percentage of the threshold; zero income is 0%.
    pub fn percentage(&self, household_income: f64, household_size: u32) -> f64 {
        if household_income > 0.0 {
            household_income / self.threshold(household_size) * 100.0
        } else {
            0.0
        }
    }
}

impl Default for FplGuidelines {
    fn default() -> Self {
        Self::FY2024
    }
}

/// Percentage under the 2024 guidelines.
pub fn fpl_percentage(household_income: f64, household_size: u32) -> f64 {
    FplGuidelines::FY2024.percentage(household_income, household_size)
}
