//! Queue analytics

pub mod errors;
pub mod models;
pub mod service;

pub use errors::AnalyticsServiceError;
pub use service::*;
