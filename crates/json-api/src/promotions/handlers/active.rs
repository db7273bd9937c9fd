//! Active Promotions Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{ids::RestaurantId, promotions::active_promotions};
use carte_app::domain::promotions::load_promotions_or_empty;

use crate::{extensions::*, promotions::models::PromotionResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivePromotionsResponse {
    /// Date and time the promotions were evaluated at
    pub at: String,

    /// Promotions running, newest first
    pub promotions: Vec<PromotionResponse>,
}

/// Active Promotions Handler
///
/// Returns the day-based promotions running at a date and time.
#[endpoint(tags("promotions"), summary = "List Active Promotions")]
pub(crate) async fn handler(
    restaurant: QueryParam<Uuid, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ActivePromotionsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let now = at.into_service_datetime(&state.settings().time_zone)?;
    let restaurant = restaurant.into_inner().map(RestaurantId::from_uuid);

    let promotions = load_promotions_or_empty(state.app.promotions.as_ref()).await;

    Ok(Json(ActivePromotionsResponse {
        at: now.to_string(),
        promotions: active_promotions(&promotions, now, restaurant)
            .into_iter()
            .map(Into::into)
            .collect(),
    }))
}
