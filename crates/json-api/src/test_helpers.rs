//! Test helpers.

use std::sync::Arc;

use jiff::{
    Timestamp, ToSpan,
    civil::{Date, Weekday, time},
    tz::TimeZone,
};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use carte::{
    events::{EventProduct, SpecialEvent},
    ids::{EventId, EventProductId, ProductId, PromotionId},
    promotions::{DayBasedPromotion, PromotionDiscount, TimeWindow},
};
use carte_app::{
    context::{AppContext, AppSettings},
    domain::{
        events::MockEventsService, products::MockProductsService,
        promotions::MockPromotionsService,
    },
};

use crate::state::State;

/// Service mocks, each rejecting any call not explicitly expected.
pub(crate) struct Mocks {
    pub(crate) events: MockEventsService,
    pub(crate) promotions: MockPromotionsService,
    pub(crate) products: MockProductsService,
}

impl Mocks {
    pub(crate) fn strict() -> Self {
        Self {
            events: strict_events_mock(),
            promotions: strict_promotions_mock(),
            products: strict_products_mock(),
        }
    }
}

pub(crate) fn strict_events_mock() -> MockEventsService {
    let mut events = MockEventsService::new();

    events.expect_load_catalog().never();

    events
}

pub(crate) fn strict_promotions_mock() -> MockPromotionsService {
    let mut promotions = MockPromotionsService::new();

    promotions.expect_list_promotions().never();

    promotions
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_get_product().never();

    products
}

pub(crate) fn test_settings() -> AppSettings {
    AppSettings {
        time_zone: TimeZone::UTC,
        ..AppSettings::default()
    }
}

pub(crate) fn state_with(mocks: Mocks, settings: AppSettings) -> Arc<State> {
    State::from_app_context(AppContext::new(
        Arc::new(mocks.events),
        Arc::new(mocks.promotions),
        Arc::new(mocks.products),
        settings,
    ))
}

pub(crate) fn service_with_settings(mocks: Mocks, settings: AppSettings, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(mocks, settings)))
            .push(route),
    )
}

pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    service_with_settings(mocks, test_settings(), route)
}

/// An active global event opening for preorders two weeks ahead.
pub(crate) fn make_event(name: &str, slug: &str, event_date: Date) -> SpecialEvent {
    SpecialEvent {
        id: EventId::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        event_date,
        preorder_start: event_date.saturating_sub(14.days()),
        preorder_end: event_date.yesterday().unwrap_or(event_date),
        restrict_menu_on_event: false,
        allowed_categories: Vec::new(),
        is_active: true,
        restaurant_id: None,
        delivery_enabled: true,
        pickup_enabled: true,
        time_slots: Vec::new(),
        free_desserts_enabled: false,
        image_url: None,
        banner_title: None,
        banner_description: None,
    }
}

pub(crate) fn make_link(event: &SpecialEvent, product: ProductId) -> EventProduct {
    EventProduct {
        id: EventProductId::new(),
        event_id: event.id,
        product_id: product,
    }
}

/// 20% off `box_du_midi` on Tuesdays from 11:00 to 14:00.
pub(crate) fn make_promotion() -> DayBasedPromotion<'static> {
    DayBasedPromotion {
        id: PromotionId::new(),
        title: "Box du Midi".to_string(),
        description: "-20% sur les box du midi".to_string(),
        discount: PromotionDiscount::Percentage(Decimal::from(20)),
        applicable_days: [Weekday::Tuesday].into_iter().collect(),
        applicable_categories: vec!["box_du_midi".to_string()],
        applicable_products: Vec::new(),
        applicable_restaurants: Vec::new(),
        window: Some(TimeWindow::new(time(11, 0, 0, 0), time(14, 0, 0, 0))),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
