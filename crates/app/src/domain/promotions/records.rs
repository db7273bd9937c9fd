//! Promotion Records

use jiff::{Timestamp, civil::Weekday};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use carte::{
    ids::{ProductId, PromotionId, RestaurantId},
    pricing::decimal_to_minor,
    promotions::{DayBasedPromotion, PromotionDiscount, TimeWindow},
};

use crate::domain::promotions::errors::PromotionRecordError;

/// A `day_based_promotions` row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRecord {
    pub id: PromotionId,
    pub title: String,
    pub description: String,
    pub discount: Decimal,
    pub is_percentage: bool,
    pub applicable_days: Vec<i32>,
    pub applicable_categories: Option<Vec<String>>,
    pub applicable_products: Option<Vec<ProductId>>,
    pub applicable_restaurants: Option<Vec<RestaurantId>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromotionRecord {
    /// Convert into an evaluable promotion. Fixed discounts are read as major units of
    /// `currency`; a time window needs both bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if a weekday, a time bound or the fixed amount is invalid.
    pub fn into_promotion(
        self,
        currency: &'static Currency,
    ) -> Result<DayBasedPromotion<'static>, PromotionRecordError> {
        let discount = if self.is_percentage {
            PromotionDiscount::Percentage(self.discount)
        } else {
            PromotionDiscount::FixedAmount(Money::from_minor(
                decimal_to_minor(self.discount, currency)?,
                currency,
            ))
        };

        let applicable_days = self
            .applicable_days
            .iter()
            .map(|day| weekday(*day))
            .collect::<Result<SmallVec<[Weekday; 7]>, _>>()?;

        let window = match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) => Some(TimeWindow::parse(start, end)?),
            _ => None,
        };

        Ok(DayBasedPromotion {
            id: self.id,
            title: self.title,
            description: self.description,
            discount,
            applicable_days,
            applicable_categories: self.applicable_categories.unwrap_or_default(),
            applicable_products: self.applicable_products.unwrap_or_default(),
            applicable_restaurants: self.applicable_restaurants.unwrap_or_default(),
            window,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn weekday(day: i32) -> Result<Weekday, PromotionRecordError> {
    i8::try_from(day)
        .ok()
        .and_then(|offset| Weekday::from_sunday_zero_offset(offset).ok())
        .ok_or(PromotionRecordError::InvalidWeekday(day))
}
