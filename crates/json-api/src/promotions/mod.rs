//! Day-based Promotions

mod handlers;
mod models;

pub(crate) use handlers::*;
