//! Special Event Records

use jiff::civil::Date;
use serde_json::Value;

use carte::{
    events::{EventProduct, SpecialEvent, slots::normalize_time_slots},
    ids::{EventId, EventProductId, ProductId, RestaurantId},
};

/// A `special_events` row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialEventRecord {
    pub id: EventId,
    pub name: String,
    pub slug: String,
    pub event_date: Date,
    pub preorder_start: Date,
    pub preorder_end: Date,
    pub restrict_menu_on_event: Option<bool>,
    pub allowed_categories: Option<Vec<String>>,
    pub is_active: bool,
    pub restaurant_id: Option<RestaurantId>,
    pub delivery_enabled: Option<bool>,
    pub pickup_enabled: Option<bool>,
    pub time_slots: Option<Value>,
    pub free_desserts_enabled: Option<bool>,
    pub image_url: Option<String>,
    pub banner_title: Option<String>,
    pub banner_description: Option<String>,
}

impl From<SpecialEventRecord> for SpecialEvent {
    fn from(record: SpecialEventRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            slug: record.slug,
            event_date: record.event_date,
            preorder_start: record.preorder_start,
            preorder_end: record.preorder_end,
            restrict_menu_on_event: record.restrict_menu_on_event.unwrap_or(false),
            allowed_categories: record.allowed_categories.unwrap_or_default(),
            is_active: record.is_active,
            restaurant_id: record.restaurant_id,
            delivery_enabled: record.delivery_enabled.unwrap_or(true),
            pickup_enabled: record.pickup_enabled.unwrap_or(true),
            time_slots: record
                .time_slots
                .as_ref()
                .map(normalize_time_slots)
                .unwrap_or_default(),
            free_desserts_enabled: record.free_desserts_enabled.unwrap_or(false),
            image_url: record.image_url,
            banner_title: record.banner_title,
            banner_description: record.banner_description,
        }
    }
}

/// An `event_products` row as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventProductRecord {
    pub id: EventProductId,
    pub event_id: EventId,
    pub product_id: ProductId,
}

impl From<EventProductRecord> for EventProduct {
    fn from(record: EventProductRecord) -> Self {
        Self {
            id: record.id,
            event_id: record.event_id,
            product_id: record.product_id,
        }
    }
}
