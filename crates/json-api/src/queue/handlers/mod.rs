//! Queue Handlers

pub(crate) mod current;
pub(crate) mod get;
pub(crate) mod next;
pub(crate) mod served;
