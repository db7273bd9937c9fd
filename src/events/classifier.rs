//! Cart Classifier

use jiff::civil::Date;
use rustc_hash::FxHashSet;

use crate::{
    cart::Cart,
    events::{EventCatalog, SpecialEvent, TimeSlot},
    ids::ProductId,
    offers::DEFAULT_FREE_DESSERT_MARKER,
};

/// What the cart contents mean for the active events.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEventInfo {
    /// At least one line is an event product
    pub has_event_products: bool,

    /// At least one line is a regular product outside desserts and drinks
    pub has_non_event_products: bool,

    /// The event the cart is bound to
    pub event: Option<SpecialEvent>,

    /// Date of that event
    pub event_date: Option<Date>,

    /// Name of that event
    pub event_name: Option<String>,

    /// Whether the order may be delivered
    pub delivery_enabled: bool,

    /// Whether the order may be picked up
    pub pickup_enabled: bool,

    /// Collection slots offered by the event
    pub event_time_slots: Vec<TimeSlot>,

    /// Every product linked to the event
    pub event_product_ids: Vec<ProductId>,

    /// Whether the event gives desserts away
    pub free_desserts_enabled: bool,

    /// Marker found in the instructions of desserts accepted through the offer
    pub free_dessert_marker: String,
}

impl Default for CartEventInfo {
    fn default() -> Self {
        Self {
            has_event_products: false,
            has_non_event_products: false,
            event: None,
            event_date: None,
            event_name: None,
            delivery_enabled: true,
            pickup_enabled: true,
            event_time_slots: Vec::new(),
            event_product_ids: Vec::new(),
            free_desserts_enabled: false,
            free_dessert_marker: DEFAULT_FREE_DESSERT_MARKER.to_string(),
        }
    }
}

impl CartEventInfo {
    /// Event product ids as a set, for membership tests.
    pub fn event_product_set(&self) -> FxHashSet<ProductId> {
        self.event_product_ids.iter().copied().collect()
    }

    /// True if the free-dessert offer applies to this cart.
    pub fn free_desserts_apply(&self) -> bool {
        self.free_desserts_enabled && self.has_event_products
    }

    /// Replace the marker of accepted free desserts.
    #[must_use]
    pub fn with_free_dessert_marker(mut self, marker: impl Into<String>) -> Self {
        self.free_dessert_marker = marker.into();
        self
    }
}

/// Classify the cart against the active events.
///
/// When lines from several events are present, the event of the last matching line is kept.
pub fn classify_cart(cart: &Cart<'_>, catalog: &EventCatalog) -> CartEventInfo {
    if cart.is_empty() {
        return CartEventInfo::default();
    }

    let mut has_event_products = false;
    let mut has_non_event_products = false;
    let mut matched: Option<&SpecialEvent> = None;

    for line in cart.lines() {
        if let Some(event) = catalog.event_for_product(line.product_id()) {
            has_event_products = true;
            matched = Some(event);
        } else if !line.item.kind.is_event_companion() {
            has_non_event_products = true;
        }
    }

    let Some(event) = matched else {
        return CartEventInfo {
            has_non_event_products,
            ..CartEventInfo::default()
        };
    };

    CartEventInfo {
        has_event_products,
        has_non_event_products,
        event: Some(event.clone()),
        event_date: Some(event.event_date),
        event_name: Some(event.name.clone()),
        delivery_enabled: event.delivery_enabled,
        pickup_enabled: event.pickup_enabled,
        event_time_slots: event.time_slots.clone(),
        event_product_ids: catalog.product_ids_for_event(event.id),
        free_desserts_enabled: event.free_desserts_enabled,
        ..CartEventInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        cart::CartLine,
        events::test_support::{event, link},
        menu::MenuItem,
    };

    use super::*;

    fn item(id: ProductId, category: &str) -> MenuItem<'static> {
        MenuItem::new(id, "Produit", category, Money::from_minor(1000, iso::EUR))
    }

    #[test]
    fn empty_cart_returns_defaults() {
        let info = classify_cart(&Cart::new(iso::EUR), &EventCatalog::empty());

        assert_eq!(info, CartEventInfo::default());
        assert!(info.delivery_enabled);
        assert!(info.pickup_enabled);
    }

    #[test]
    fn regular_product_without_events_sets_non_event_flag() -> TestResult {
        let cart = Cart::with_lines(
            [CartLine::new(item(ProductId::new(), "plateaux"), 1)],
            iso::EUR,
        )?;

        let info = classify_cart(&cart, &EventCatalog::empty());

        assert!(info.has_non_event_products);
        assert!(!info.has_event_products);
        assert_eq!(
            info,
            CartEventInfo {
                has_non_event_products: true,
                ..CartEventInfo::default()
            }
        );

        Ok(())
    }

    #[test]
    fn companions_without_events_keep_defaults() -> TestResult {
        let cart = Cart::with_lines(
            [
                CartLine::new(item(ProductId::new(), "desserts"), 1),
                CartLine::new(item(ProductId::new(), "boissons"), 2),
            ],
            iso::EUR,
        )?;

        let info = classify_cart(&cart, &EventCatalog::empty());

        assert_eq!(info, CartEventInfo::default());

        Ok(())
    }

    #[test]
    fn event_product_binds_cart_to_event() -> TestResult {
        let bundle = ProductId::new();
        let other_bundle = ProductId::new();
        let mut valentin = event("Saint Valentin", "st-valentin", date(2026, 2, 14));
        valentin.pickup_enabled = false;
        valentin.free_desserts_enabled = true;

        let catalog = EventCatalog::new(
            vec![valentin.clone()],
            vec![link(&valentin, bundle), link(&valentin, other_bundle)],
        );

        let cart = Cart::with_lines(
            [
                CartLine::new(item(bundle, "plateaux"), 2),
                CartLine::new(item(ProductId::new(), "desserts_stmartin"), 1),
            ],
            iso::EUR,
        )?;

        let info = classify_cart(&cart, &catalog);

        assert!(info.has_event_products);
        assert!(!info.has_non_event_products, "desserts stay companions");
        assert_eq!(info.event_name.as_deref(), Some("Saint Valentin"));
        assert_eq!(info.event_date, Some(date(2026, 2, 14)));
        assert!(info.delivery_enabled);
        assert!(!info.pickup_enabled);
        assert_eq!(info.event_product_ids, vec![bundle, other_bundle]);
        assert!(info.free_desserts_apply());

        Ok(())
    }

    #[test]
    fn last_matching_event_wins() -> TestResult {
        let first_product = ProductId::new();
        let last_product = ProductId::new();
        let noel = event("Noël", "noel", date(2025, 12, 24));
        let nouvel_an = event("Nouvel an", "nouvel-an", date(2025, 12, 31));

        let catalog = EventCatalog::new(
            vec![noel.clone(), nouvel_an.clone()],
            vec![link(&noel, first_product), link(&nouvel_an, last_product)],
        );

        let cart = Cart::with_lines(
            [
                CartLine::new(item(first_product, "plateaux"), 1),
                CartLine::new(item(last_product, "plateaux"), 1),
            ],
            iso::EUR,
        )?;

        let info = classify_cart(&cart, &catalog);

        assert_eq!(info.event.map(|e| e.id), Some(nouvel_an.id));
        assert_eq!(info.event_product_ids, vec![last_product]);

        Ok(())
    }

    #[test]
    fn mixed_cart_sets_both_flags() -> TestResult {
        let bundle = ProductId::new();
        let noel = event("Noël", "noel", date(2025, 12, 24));
        let catalog = EventCatalog::new(vec![noel.clone()], vec![link(&noel, bundle)]);

        let cart = Cart::with_lines(
            [
                CartLine::new(item(bundle, "plateaux"), 1),
                CartLine::new(item(ProductId::new(), "sushi_classique"), 1),
            ],
            iso::EUR,
        )?;

        let info = classify_cart(&cart, &catalog);

        assert!(info.has_event_products);
        assert!(info.has_non_event_products);

        Ok(())
    }
}
