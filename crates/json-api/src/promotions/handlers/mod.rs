//! Promotion Handlers

pub(crate) mod active;
pub(crate) mod quote;
