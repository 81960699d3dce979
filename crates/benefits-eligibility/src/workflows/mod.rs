pub mod catalog;
pub mod eligibility;
