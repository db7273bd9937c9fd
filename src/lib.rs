//! Carte
//!
//! Carte decides what a restaurant cart is eligible for: special events and their menu
//! restrictions, free desserts alongside event products, and day-based promotions.

pub mod cart;
pub mod desserts;
pub mod events;
pub mod ids;
pub mod menu;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod promotions;
