//! Free Dessert Offer Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{
    ids::{ProductId, RestaurantId},
    offers::{FreeDessertOffer, Suppression},
};
use carte_app::{domain::events::load_catalog_or_empty, offers::OfferOutcome};

use crate::{
    extensions::*,
    models::{CartLinePayload, MenuItemPayload, into_cart},
};

/// Free Dessert Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FreeDessertOfferRequest {
    /// Event product just added to the cart
    pub trigger_product_id: Uuid,

    /// Restaurant the cart is ordered from
    pub restaurant_id: Uuid,

    /// Service day, defaults to today
    #[serde(default)]
    pub date: Option<String>,

    /// Cart lines, including the product just added
    pub lines: Vec<CartLinePayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OfferStatus {
    /// A free dessert is offered
    Offered,

    /// No offer is made
    Suppressed,

    /// The dessert could not be loaded
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SuppressionReason {
    /// The product added is not an event product
    NotEventProduct,

    /// The restaurant gives no dessert away
    NoDessertConfigured,

    /// Every event product already has its free dessert
    QuotaExhausted,
}

/// Free Dessert Offer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FreeDessertOfferResponse {
    /// How the offer ended
    pub status: OfferStatus,

    /// The dessert offered, priced at zero
    pub dessert: Option<MenuItemPayload>,

    /// Cart line to add when the offer is accepted
    pub line: Option<CartLinePayload>,

    /// Why no offer was made
    pub reason: Option<SuppressionReason>,

    /// Free desserts already in the cart, when the quota is exhausted
    pub free_desserts: Option<u64>,

    /// Event product units in the cart, when the quota is exhausted
    pub event_units: Option<u64>,
}

impl FreeDessertOfferResponse {
    fn status(status: OfferStatus) -> Self {
        FreeDessertOfferResponse {
            status,
            dessert: None,
            line: None,
            reason: None,
            free_desserts: None,
            event_units: None,
        }
    }

    fn suppressed(suppression: Suppression) -> Self {
        let response = Self::status(OfferStatus::Suppressed);

        match suppression {
            Suppression::NotEventProduct => FreeDessertOfferResponse {
                reason: Some(SuppressionReason::NotEventProduct),
                ..response
            },
            Suppression::NoDessertConfigured => FreeDessertOfferResponse {
                reason: Some(SuppressionReason::NoDessertConfigured),
                ..response
            },
            Suppression::QuotaExhausted {
                free_desserts,
                event_units,
            } => FreeDessertOfferResponse {
                reason: Some(SuppressionReason::QuotaExhausted),
                free_desserts: Some(free_desserts),
                event_units: Some(event_units),
                ..response
            },
        }
    }
}

/// Free Dessert Offer Handler
///
/// Runs the free dessert offer for an event product added to the cart.
#[endpoint(
    tags("offers"),
    summary = "Offer Free Dessert",
    responses(
        (status_code = StatusCode::OK, description = "Offer evaluated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<FreeDessertOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<FreeDessertOfferResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let settings = state.settings();

    let today = request.date.into_service_date(&settings.time_zone)?;
    let restaurant = RestaurantId::from_uuid(request.restaurant_id);
    let trigger = ProductId::from_uuid(request.trigger_product_id);
    let cart = into_cart(request.lines, settings.currency)?;

    let catalog = load_catalog_or_empty(state.app.events.as_ref(), Some(restaurant), today).await;
    let mut offer = FreeDessertOffer::new(settings.offers.clone());

    let outcome = state
        .app
        .offers
        .drive(&mut offer, trigger, restaurant, &cart, &catalog)
        .await
        .or_500("failed to run free dessert offer")?;

    let response = match outcome {
        OfferOutcome::Offered(dessert) => {
            let event_name = catalog
                .event_for_product(trigger)
                .map(|event| event.name.as_str());

            let line = offer.free_dessert_line(dessert.clone(), event_name);

            FreeDessertOfferResponse {
                dessert: Some((&dessert).into()),
                line: Some((&line).into()),
                ..FreeDessertOfferResponse::status(OfferStatus::Offered)
            }
        }
        OfferOutcome::Suppressed(suppression) => {
            FreeDessertOfferResponse::suppressed(suppression)
        }
        OfferOutcome::Unavailable => FreeDessertOfferResponse::status(OfferStatus::Unavailable),
    };

    Ok(Json(response))
}
