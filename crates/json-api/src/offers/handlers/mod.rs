//! Offer Handlers

pub(crate) mod free_dessert;
