//! Cart Handlers

pub(crate) mod events;
