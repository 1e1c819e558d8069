//! Operator authentication

pub(crate) mod middleware;
