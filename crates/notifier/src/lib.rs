//! Outbound sinks: per-item alert delivery and the batched order update.

pub mod alerts;
pub mod updates;
