//! Menu Handlers

pub(crate) mod filter;
