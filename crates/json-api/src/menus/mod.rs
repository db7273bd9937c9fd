//! Menus

mod handlers;

pub(crate) use handlers::*;
