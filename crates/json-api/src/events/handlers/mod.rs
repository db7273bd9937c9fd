//! Event Handlers

pub(crate) mod index;
