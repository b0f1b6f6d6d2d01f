//! Input readers for the offline training and evaluation commands.
pub mod dataset;

pub use dataset::{read_survey_csv, Dataset};
