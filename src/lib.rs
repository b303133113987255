//! Condition analysis of periodic bridge inspections.
//!
//! The pipeline is `load -> filter_regions -> view`: the loader turns the
//! exported inspection table into typed records, the region filter narrows
//! it, and each view in [`views`] derives its result from the narrowed
//! table without keeping any state between calls.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod rating;
pub mod session;
pub mod types;
pub mod util;
pub mod views;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use loader::{load_from_reader, load_inspections, LoadReport};
pub use rating::RatingField;
pub use types::{InspectionRecord, ScorePolicy};
