//! Queue Analytics

mod errors;
pub(crate) mod metrics;
