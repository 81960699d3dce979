mod export;
mod summary;
pub mod views;

pub use export::{format_dollars, SummaryExport};
pub use summary::EligibilitySummary;
