//! Device activation registry

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
mod transition;

pub use errors::DevicesServiceError;
pub use service::*;
