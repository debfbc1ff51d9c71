//! Shared plumbing for the OrderHerald pipeline: order types, error taxonomy,
//! configuration, the diagnostic sink, and the HTTP transport seam.

pub mod config;
pub mod diag;
pub mod error;
pub mod testing;
pub mod transport;
pub mod types;
