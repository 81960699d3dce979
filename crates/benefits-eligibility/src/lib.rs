//! Eligibility matching for public benefits programs serving individuals with disabilities
//! and their households.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
