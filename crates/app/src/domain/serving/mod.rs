//! Serving cursor

pub mod errors;
mod repository;
pub mod service;

pub use errors::ServingServiceError;
pub use service::*;
