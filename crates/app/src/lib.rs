//! Queue engine domain, persistence, and admin tooling.

pub mod auth;
pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod retry;

#[cfg(test)]
mod test;
