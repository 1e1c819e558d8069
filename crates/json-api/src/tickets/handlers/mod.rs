//! Ticket Handlers

pub(crate) mod issue;
pub(crate) mod last;
