//! Orders source and the single-run orchestrator.

pub mod fetch;
pub mod run;
