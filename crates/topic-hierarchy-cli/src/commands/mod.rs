//! CLI command handlers
//!
//! # Modules
//!
//! - `run`: full reconciliation pipeline command
//! - `validate`: spec validation without side effects

pub mod run;
pub mod validate;
