//! Free-dessert Offers

mod handlers;

pub(crate) use handlers::*;
