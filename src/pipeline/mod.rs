//! Pipeline plumbing around the stopword stage.
//!
//! - [`stage`]: capability-based stage contract and ordered stage plans
//! - [`options`]: engine stage list and properties from analysis options
//! - [`validation`]: rule-based checks over a stage plan

pub mod error_code;
pub mod errors;
pub mod options;
pub mod stage;
pub mod validation;
