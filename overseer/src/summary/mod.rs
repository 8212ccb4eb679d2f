//! Scan summary types and helpers.

mod result;
mod run_summary;

pub use result::{RepositoryOutcome, SkipReason};
pub use run_summary::ScanSummary;
