//! Tenants
//!
//! The operator's own tenant sits behind a bearer token. The directory
//! endpoints are public so devices can pick a tenant during setup and
//! displays can show its name and open counters.

mod errors;
pub(crate) mod get;
pub(crate) mod index;
mod models;
pub(crate) mod show;
