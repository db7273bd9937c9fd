//! Promotion Quote Handler

use rusty_money::Money;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{
    ids::{ProductId, RestaurantId},
    promotions::{calculate_promotion_discount, promotion_for_product},
};
use carte_app::domain::promotions::load_promotions_or_empty;

use crate::{extensions::*, promotions::models::PromotionResponse};

/// Promotion Quote Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequest {
    /// Product to price
    pub product_id: Uuid,

    /// Category the product is listed under
    pub category: String,

    /// Unit price in minor units
    pub price: i64,

    /// Restaurant the product is ordered from
    #[serde(default)]
    pub restaurant_id: Option<Uuid>,

    /// Date and time to price at, defaults to now
    #[serde(default)]
    pub at: Option<String>,
}

/// Promotion Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    /// Promotion applied, if any
    pub promotion: Option<PromotionResponse>,

    /// Price before the promotion, in minor units
    pub price: i64,

    /// Price charged, in minor units
    pub discounted_price: i64,

    /// Amount taken off, in minor units
    pub discount_amount: i64,
}

/// Promotion Quote Handler
///
/// Prices a product with the promotion that applies to it.
#[endpoint(
    tags("promotions"),
    summary = "Quote Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Product priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let settings = state.settings();

    if request.price < 0 {
        return Err(StatusError::bad_request().brief("Prices must not be negative"));
    }

    let now = request.at.into_service_datetime(&settings.time_zone)?;
    let restaurant = request.restaurant_id.map(RestaurantId::from_uuid);
    let price = Money::from_minor(request.price, settings.currency);

    let promotions = load_promotions_or_empty(state.app.promotions.as_ref()).await;

    let Some(promotion) = promotion_for_product(
        ProductId::from_uuid(request.product_id),
        &request.category,
        &promotions,
        now,
        restaurant,
    ) else {
        return Ok(Json(QuoteResponse {
            promotion: None,
            price: request.price,
            discounted_price: request.price,
            discount_amount: 0,
        }));
    };

    let quote =
        calculate_promotion_discount(price, promotion).or_500("failed to apply promotion")?;

    Ok(Json(QuoteResponse {
        promotion: Some(promotion.into()),
        price: request.price,
        discounted_price: quote.discounted_price.to_minor_units(),
        discount_amount: quote.discount_amount.to_minor_units(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use carte::promotions::{DayBasedPromotion, PromotionDiscount};
    use carte_app::domain::promotions::MockPromotionsService;

    use crate::test_helpers::{Mocks, make_promotion, service};

    use super::*;

    fn make_service(promotions: Vec<DayBasedPromotion<'static>>) -> Service {
        let mut mock = MockPromotionsService::new();

        mock.expect_list_promotions()
            .once()
            .return_once(move || Ok(promotions));

        let mocks = Mocks {
            promotions: mock,
            ..Mocks::strict()
        };

        service(mocks, Router::with_path("promotions/quote").post(handler))
    }

    #[tokio::test]
    async fn test_percentage_quote() -> TestResult {
        let promotion = DayBasedPromotion {
            discount: PromotionDiscount::Percentage(Decimal::TEN),
            ..make_promotion()
        };

        let body = json!({
            "product_id": Uuid::now_v7(),
            "category": "box_du_midi",
            "price": 2000,
            "at": "2026-02-17T12:30",
        });

        let response: QuoteResponse = TestClient::post("http://example.com/promotions/quote")
            .json(&body)
            .send(&make_service(vec![promotion]))
            .await
            .take_json()
            .await?;

        assert!(response.promotion.is_some());
        assert_eq!(response.discounted_price, 1800);
        assert_eq!(response.discount_amount, 200);

        Ok(())
    }

    #[tokio::test]
    async fn test_fixed_quote_is_capped_at_price() -> TestResult {
        let promotion = DayBasedPromotion {
            discount: PromotionDiscount::FixedAmount(Money::from_minor(1000, iso::EUR)),
            ..make_promotion()
        };

        let body = json!({
            "product_id": Uuid::now_v7(),
            "category": "box_du_midi",
            "price": 500,
            "at": "2026-02-17T12:30",
        });

        let response: QuoteResponse = TestClient::post("http://example.com/promotions/quote")
            .json(&body)
            .send(&make_service(vec![promotion]))
            .await
            .take_json()
            .await?;

        assert_eq!(response.discounted_price, 0);
        assert_eq!(response.discount_amount, 500);

        Ok(())
    }

    #[tokio::test]
    async fn test_product_promotion_wins_over_category() -> TestResult {
        let product = ProductId::new();

        let category_wide = make_promotion();
        let product_specific = DayBasedPromotion {
            discount: PromotionDiscount::FixedAmount(Money::from_minor(300, iso::EUR)),
            applicable_products: vec![product],
            ..make_promotion()
        };
        let expected = product_specific.id.into_uuid();

        let body = json!({
            "product_id": product.into_uuid(),
            "category": "box_du_midi",
            "price": 1500,
            "at": "2026-02-17T12:30",
        });

        let response: QuoteResponse = TestClient::post("http://example.com/promotions/quote")
            .json(&body)
            .send(&make_service(vec![category_wide, product_specific]))
            .await
            .take_json()
            .await?;

        assert_eq!(response.promotion.map(|p| p.id), Some(expected));
        assert_eq!(response.discounted_price, 1200);

        Ok(())
    }

    #[tokio::test]
    async fn test_no_promotion_keeps_price() -> TestResult {
        let body = json!({
            "product_id": Uuid::now_v7(),
            "category": "sushi_classique",
            "price": 1200,
            "at": "2026-02-17T12:30",
        });

        let response: QuoteResponse = TestClient::post("http://example.com/promotions/quote")
            .json(&body)
            .send(&make_service(vec![make_promotion()]))
            .await
            .take_json()
            .await?;

        assert!(response.promotion.is_none());
        assert_eq!(response.discounted_price, 1200);
        assert_eq!(response.discount_amount, 0);

        Ok(())
    }
}
