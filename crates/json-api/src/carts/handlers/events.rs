//! Cart Events Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{
    desserts::{calculate_dessert_discount, free_dessert_info, total_with_free_desserts},
    events::classifier::{CartEventInfo, classify_cart},
    ids::RestaurantId,
};
use carte_app::domain::events::load_catalog_or_empty;

use crate::{
    extensions::*,
    models::{CartLinePayload, TimeSlotResponse, into_cart},
};

/// Cart Events Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEventsRequest {
    /// Restaurant the cart is ordered from
    #[serde(default)]
    pub restaurant_id: Option<Uuid>,

    /// Service day, defaults to today
    #[serde(default)]
    pub date: Option<String>,

    /// Cart lines
    pub lines: Vec<CartLinePayload>,
}

/// Free dessert status of one cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineFreeDessertResponse {
    /// Line position in the request
    pub line: usize,

    /// Whether any unit of the line is free
    pub is_free_dessert: bool,

    /// Free units
    pub free_quantity: u32,

    /// Unit price before the free dessert, in minor units
    pub original_price: i64,

    /// Event giving the dessert away
    pub event_name: Option<String>,
}

/// Cart Events Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEventsResponse {
    /// Whether the cart holds an event product
    pub has_event_products: bool,

    /// Whether the cart holds a regular product other than a dessert or drink
    pub has_non_event_products: bool,

    /// Day of the cart's event
    pub event_date: Option<String>,

    /// Name of the cart's event
    pub event_name: Option<String>,

    /// Whether delivery is offered
    pub delivery_enabled: bool,

    /// Whether pickup is offered
    pub pickup_enabled: bool,

    /// Collection slots of the cart's event
    pub event_time_slots: Vec<TimeSlotResponse>,

    /// Products linked to the cart's event
    pub event_product_ids: Vec<Uuid>,

    /// Whether the cart's event gives desserts away
    pub free_desserts_enabled: bool,

    /// Free dessert status per line
    pub lines: Vec<LineFreeDessertResponse>,

    /// Value of the free desserts, in minor units
    pub dessert_discount: i64,

    /// Cart total before free desserts, in minor units
    pub subtotal: i64,

    /// Cart total after free desserts, in minor units
    pub total: i64,
}

impl CartEventsResponse {
    fn new(info: &CartEventInfo) -> Self {
        CartEventsResponse {
            has_event_products: info.has_event_products,
            has_non_event_products: info.has_non_event_products,
            event_date: info.event_date.map(|date| date.to_string()),
            event_name: info.event_name.clone(),
            delivery_enabled: info.delivery_enabled,
            pickup_enabled: info.pickup_enabled,
            event_time_slots: info.event_time_slots.iter().map(Into::into).collect(),
            event_product_ids: info
                .event_product_ids
                .iter()
                .map(|id| id.into_uuid())
                .collect(),
            free_desserts_enabled: info.free_desserts_enabled,
            lines: Vec::new(),
            dessert_discount: 0,
            subtotal: 0,
            total: 0,
        }
    }
}

/// Cart Events Handler
///
/// Classifies a cart against the active events and prices its free desserts.
#[endpoint(
    tags("carts"),
    summary = "Classify Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart classified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartEventsRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEventsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let settings = state.settings();

    let today = request.date.into_service_date(&settings.time_zone)?;
    let restaurant = request.restaurant_id.map(RestaurantId::from_uuid);
    let cart = into_cart(request.lines, settings.currency)?;

    let catalog = load_catalog_or_empty(state.app.events.as_ref(), restaurant, today).await;
    let info = classify_cart(&cart, &catalog).with_free_dessert_marker(&settings.offers.marker);

    let lines = (0..cart.len())
        .filter_map(|index| {
            free_dessert_info(&cart, &info, index).map(|free| LineFreeDessertResponse {
                line: index,
                is_free_dessert: free.is_free_dessert,
                free_quantity: free.free_quantity,
                original_price: free.original_price.to_minor_units(),
                event_name: free.event_name,
            })
        })
        .collect();

    let dessert_discount =
        calculate_dessert_discount(&cart, &info).or_500("failed to price free desserts")?;
    let subtotal = cart.subtotal().or_500("failed to price cart")?;
    let total = total_with_free_desserts(&cart, &info).or_500("failed to price cart")?;

    Ok(Json(CartEventsResponse {
        lines,
        dessert_discount: dessert_discount.to_minor_units(),
        subtotal: subtotal.to_minor_units(),
        total: total.to_minor_units(),
        ..CartEventsResponse::new(&info)
    }))
}
