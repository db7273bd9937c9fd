//! Special Events

mod handlers;

pub(crate) use handlers::*;
