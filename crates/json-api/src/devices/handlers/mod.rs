//! Device Handlers

pub(crate) mod activate;
pub(crate) mod get;
pub(crate) mod index;
