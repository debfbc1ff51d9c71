//! Order processing pipeline: the delivered predicate, per-item alerting,
//! and counter bookkeeping.

pub mod processor;
