//! Queue Domain Concerns

pub mod analytics;
pub mod devices;
pub mod serving;
pub mod tenants;
pub mod tickets;
