//! obesity-core: building blocks for the obesity-level prediction pipeline.
//!
//! This crate provides the canonical survey schema and locale vocabulary,
//! fitted categorical encoders and a numeric scaler, model wrappers (a
//! one-vs-rest gradient-boosted classifier and a Random Forest baseline),
//! an artifact store for the fitted objects, evaluation helpers, and the
//! stateless request pipeline that turns one survey row into a predicted
//! obesity class plus an explanation.
//!
//! The design favors small, testable modules. All fitted objects are
//! immutable after loading and shared read-only across requests.
pub mod artifacts;
pub mod config;
pub mod encoding;
pub mod error;
pub mod eval;
pub mod explain;
pub mod io;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod schema;
pub mod translate;
