//! Carte Domain Concerns

pub mod events;
pub mod products;
pub mod promotions;
