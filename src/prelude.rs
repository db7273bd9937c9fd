//! Carte prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    desserts::{
        FREE_DESSERT_LABEL, FreeDessertAllocation, FreeDessertInfo, allocate_free_desserts,
        apply_free_dessert_prices, calculate_dessert_discount, free_dessert_info, offered_units,
        total_with_free_desserts,
    },
    events::{
        EventCatalog, EventProduct, SpecialEvent, TimeSlot,
        christmas::{ChristmasMode, is_christmas_event},
        classifier::{CartEventInfo, classify_cart},
        exclusivity::filter_categories_for_event_exclusivity,
        slots::normalize_time_slots,
    },
    ids::{EventId, EventProductId, ProductId, PromotionId, RestaurantId, TypedUuid},
    menu::{CatalogProduct, CategoryKind, MenuCategory, MenuItem},
    offers::{
        FreeDessertOffer, FreeDessertTable, FreeDessertTableError, OfferError, OfferSettings,
        OfferState, Suppression, TriggerOutcome,
    },
    pricing::PricingError,
    promotions::{
        DayBasedPromotion, PromotionDiscount, PromotionPrice, TimeWindow, TimeWindowError,
        active_promotions, calculate_promotion_discount, day_name, is_promotion_active,
        promotion_for_category, promotion_for_product,
    },
};
