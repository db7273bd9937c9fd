//! Event Index Handler

use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{
    events::{EventCatalog, SpecialEvent, christmas::ChristmasMode},
    ids::RestaurantId,
};
use carte_app::domain::events::load_catalog_or_empty;

use crate::{extensions::*, models::TimeSlotResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventResponse {
    /// The unique identifier of the event
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Day the event takes place
    pub event_date: String,

    /// First day orders are taken
    pub preorder_start: String,

    /// Last day of the preorder period
    pub preorder_end: String,

    /// Whether the menu is restricted on the event day
    pub restrict_menu_on_event: bool,

    /// Categories still orderable when the menu is restricted
    pub allowed_categories: Vec<String>,

    /// Restaurant the event is limited to, absent for every restaurant
    pub restaurant_id: Option<Uuid>,

    /// Whether delivery is offered
    pub delivery_enabled: bool,

    /// Whether pickup is offered
    pub pickup_enabled: bool,

    /// Collection slots
    pub time_slots: Vec<TimeSlotResponse>,

    /// Whether the event gives desserts away
    pub free_desserts_enabled: bool,

    /// Banner image
    pub image_url: Option<String>,

    /// Banner title
    pub banner_title: Option<String>,

    /// Banner text
    pub banner_description: Option<String>,

    /// Whether the requested day is the event day
    pub is_event_day: bool,

    /// Whether the requested day falls in the preorder period
    pub is_preorder_period: bool,

    /// Products linked to the event
    pub product_ids: Vec<Uuid>,
}

impl EventResponse {
    fn new(event: &SpecialEvent, catalog: &EventCatalog, today: Date) -> Self {
        EventResponse {
            id: event.id.into_uuid(),
            name: event.name.clone(),
            slug: event.slug.clone(),
            event_date: event.event_date.to_string(),
            preorder_start: event.preorder_start.to_string(),
            preorder_end: event.preorder_end.to_string(),
            restrict_menu_on_event: event.restrict_menu_on_event,
            allowed_categories: event.allowed_categories().to_vec(),
            restaurant_id: event.restaurant_id.map(|id| id.into_uuid()),
            delivery_enabled: event.delivery_enabled,
            pickup_enabled: event.pickup_enabled,
            time_slots: event.time_slots.iter().map(Into::into).collect(),
            free_desserts_enabled: event.free_desserts_enabled,
            image_url: event.image_url.clone(),
            banner_title: event.banner_title.clone(),
            banner_description: event.banner_description.clone(),
            is_event_day: event.is_event_day(today),
            is_preorder_period: event.is_preorder_period(today),
            product_ids: catalog
                .product_ids_for_event(event.id)
                .into_iter()
                .map(|id| id.into_uuid())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChristmasResponse {
    /// Whether today is Christmas day
    pub is_christmas_mode: bool,

    /// Whether Christmas preorders are open
    pub is_preorder_mode: bool,

    /// Christmas day, absent without a Christmas event
    pub event_date: Option<String>,

    /// Products linked to the Christmas event
    pub product_ids: Vec<Uuid>,
}

impl From<ChristmasMode<'_>> for ChristmasResponse {
    fn from(mode: ChristmasMode<'_>) -> Self {
        ChristmasResponse {
            is_christmas_mode: mode.is_christmas_mode(),
            is_preorder_mode: mode.is_preorder_mode(),
            event_date: mode.event_date().map(|date| date.to_string()),
            product_ids: mode
                .christmas_product_ids()
                .into_iter()
                .map(|id| id.into_uuid())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventsResponse {
    /// Day the events were evaluated for
    pub date: String,

    /// Events open for orders
    pub events: Vec<EventResponse>,

    /// Christmas status
    pub christmas: ChristmasResponse,
}

/// Event Index Handler
///
/// Returns the events open for orders on a day, with their linked products.
#[endpoint(tags("events"), summary = "List Active Events")]
pub(crate) async fn handler(
    restaurant: QueryParam<Uuid, false>,
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<EventsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let today = date.into_service_date(&state.settings().time_zone)?;
    let restaurant = restaurant.into_inner().map(RestaurantId::from_uuid);

    let catalog = load_catalog_or_empty(state.app.events.as_ref(), restaurant, today).await;

    Ok(Json(EventsResponse {
        date: today.to_string(),
        events: catalog
            .events()
            .iter()
            .map(|event| EventResponse::new(event, &catalog, today))
            .collect(),
        christmas: ChristmasMode::new(&catalog, today).into(),
    }))
}
