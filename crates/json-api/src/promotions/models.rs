//! Promotion Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::promotions::{DayBasedPromotion, PromotionDiscount, day_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountKind {
    /// Percentage of the price
    Percentage,

    /// Fixed amount off the price
    FixedAmount,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionResponse {
    /// The unique identifier of the promotion
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Display text
    pub description: String,

    /// How the discount is expressed
    pub discount_kind: DiscountKind,

    /// Percentage taken off, for percentage promotions
    pub discount_percentage: Option<String>,

    /// Amount taken off in minor units, for fixed amount promotions
    pub discount_amount: Option<i64>,

    /// Days the promotion runs, Sunday being 0
    pub applicable_days: Vec<i8>,

    /// Names of the days the promotion runs
    pub day_names: Vec<String>,

    /// Categories covered, empty for every category
    pub applicable_categories: Vec<String>,

    /// Products covered
    pub applicable_products: Vec<Uuid>,

    /// Restaurants covered, empty for every restaurant
    pub applicable_restaurants: Vec<Uuid>,

    /// Daily start, as `HH:MM`
    pub start_time: Option<String>,

    /// Daily end, as `HH:MM`
    pub end_time: Option<String>,
}

impl From<&DayBasedPromotion<'_>> for PromotionResponse {
    fn from(promotion: &DayBasedPromotion<'_>) -> Self {
        let (discount_kind, discount_percentage, discount_amount) = match promotion.discount {
            PromotionDiscount::Percentage(percent) => {
                (DiscountKind::Percentage, Some(percent.to_string()), None)
            }
            PromotionDiscount::FixedAmount(amount) => {
                (DiscountKind::FixedAmount, None, Some(amount.to_minor_units()))
            }
        };

        PromotionResponse {
            id: promotion.id.into_uuid(),
            title: promotion.title.clone(),
            description: promotion.description.clone(),
            discount_kind,
            discount_percentage,
            discount_amount,
            applicable_days: promotion
                .applicable_days
                .iter()
                .map(|day| day.to_sunday_zero_offset())
                .collect(),
            day_names: promotion
                .applicable_days
                .iter()
                .map(|day| day_name(*day).to_string())
                .collect(),
            applicable_categories: promotion.applicable_categories.clone(),
            applicable_products: promotion
                .applicable_products
                .iter()
                .map(|id| id.into_uuid())
                .collect(),
            applicable_restaurants: promotion
                .applicable_restaurants
                .iter()
                .map(|id| id.into_uuid())
                .collect(),
            start_time: promotion
                .window
                .map(|window| window.start().strftime("%H:%M").to_string()),
            end_time: promotion
                .window
                .map(|window| window.end().strftime("%H:%M").to_string()),
        }
    }
}
