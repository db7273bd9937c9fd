//! Special Events
//!
//! Calendar-bound promotional campaigns (Christmas, Saint Valentin, ...) and the products
//! linked to them.

use jiff::civil::Date;
use rustc_hash::FxHashSet;

use crate::ids::{EventId, EventProductId, ProductId, RestaurantId};

pub mod christmas;
pub mod classifier;
pub mod exclusivity;
pub mod slots;

pub use slots::TimeSlot;

/// A promotional campaign tied to a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialEvent {
    /// Event identifier
    pub id: EventId,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// The day the event takes place
    pub event_date: Date,

    /// First day pre-orders are accepted
    pub preorder_start: Date,

    /// Last day pre-orders are accepted
    pub preorder_end: Date,

    /// Whether the menu is restricted to event products on the event day
    pub restrict_menu_on_event: bool,

    /// Category labels exempt from the restriction
    pub allowed_categories: Vec<String>,

    /// Whether staff enabled the event
    pub is_active: bool,

    /// Owning restaurant; `None` applies to every restaurant
    pub restaurant_id: Option<RestaurantId>,

    /// Whether event orders can be delivered
    pub delivery_enabled: bool,

    /// Whether event orders can be picked up
    pub pickup_enabled: bool,

    /// Ordered collection slots
    pub time_slots: Vec<TimeSlot>,

    /// Whether desserts are free alongside event products
    pub free_desserts_enabled: bool,

    /// Banner image
    pub image_url: Option<String>,

    /// Banner title
    pub banner_title: Option<String>,

    /// Banner description
    pub banner_description: Option<String>,
}

impl SpecialEvent {
    /// True on the event date itself.
    pub fn is_event_day(&self, today: Date) -> bool {
        self.event_date == today
    }

    /// True inside `[preorder_start, preorder_end]` and strictly before the event date.
    pub fn is_preorder_period(&self, today: Date) -> bool {
        self.preorder_start <= today && today <= self.preorder_end && today < self.event_date
    }

    /// True when the event is enabled and `today` is within `[preorder_start, event_date]`.
    pub fn is_open_on(&self, today: Date) -> bool {
        self.is_active && self.preorder_start <= today && today <= self.event_date
    }

    /// Global events apply everywhere; scoped ones only to their restaurant.
    ///
    /// Without a restaurant only global events apply.
    pub fn applies_to(&self, restaurant: Option<RestaurantId>) -> bool {
        match (self.restaurant_id, restaurant) {
            (None, _) => true,
            (Some(owner), Some(restaurant)) => owner == restaurant,
            (Some(_), None) => false,
        }
    }

    /// Category labels that stay fully orderable on a restricted event day.
    pub fn allowed_categories(&self) -> &[String] {
        &self.allowed_categories
    }
}

/// Link between a special event and a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventProduct {
    /// Link identifier
    pub id: EventProductId,

    /// Linked event
    pub event_id: EventId,

    /// Linked product
    pub product_id: ProductId,
}

/// The events active for a restaurant on a given day, with their product links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCatalog {
    events: Vec<SpecialEvent>,
    links: Vec<EventProduct>,
}

impl EventCatalog {
    /// Build a catalog from already-selected events and links.
    pub fn new(events: Vec<SpecialEvent>, links: Vec<EventProduct>) -> Self {
        Self { events, links }
    }

    /// A catalog with no events.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keep only the events open on `today` for `restaurant`, and the links pointing at them.
    pub fn open_on(
        events: Vec<SpecialEvent>,
        links: Vec<EventProduct>,
        today: Date,
        restaurant: Option<RestaurantId>,
    ) -> Self {
        let events: Vec<_> = events
            .into_iter()
            .filter(|event| event.is_open_on(today) && event.applies_to(restaurant))
            .collect();

        let ids: FxHashSet<EventId> = events.iter().map(|event| event.id).collect();

        let links = links
            .into_iter()
            .filter(|link| ids.contains(&link.event_id))
            .collect();

        Self { events, links }
    }

    /// Active events in load order.
    pub fn events(&self) -> &[SpecialEvent] {
        &self.events
    }

    /// Event/product links in load order.
    pub fn links(&self) -> &[EventProduct] {
        &self.links
    }

    /// True when no event is active.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by id.
    pub fn event(&self, id: EventId) -> Option<&SpecialEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// The event a product belongs to. The first link for the product wins.
    pub fn event_for_product(&self, product: ProductId) -> Option<&SpecialEvent> {
        let link = self.links.iter().find(|link| link.product_id == product)?;

        self.event(link.event_id)
    }

    /// True if the product is linked to an active event.
    pub fn is_event_product(&self, product: ProductId) -> bool {
        self.event_for_product(product).is_some()
    }

    /// All products linked to `event`, in link order.
    pub fn product_ids_for_event(&self, event: EventId) -> Vec<ProductId> {
        self.links
            .iter()
            .filter(|link| link.event_id == event)
            .map(|link| link.product_id)
            .collect()
    }

    /// True if any active event takes place today.
    pub fn any_event_day(&self, today: Date) -> bool {
        self.events.iter().any(|event| event.is_event_day(today))
    }

    /// True if any active event is in its pre-order period.
    pub fn any_preorder_period(&self, today: Date) -> bool {
        self.events
            .iter()
            .any(|event| event.is_preorder_period(today))
    }

    /// The first event taking place today that restricts the menu.
    pub fn restricted_menu_event(&self, today: Date) -> Option<&SpecialEvent> {
        self.events
            .iter()
            .find(|event| event.is_event_day(today) && event.restrict_menu_on_event)
    }
}
