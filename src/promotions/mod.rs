//! Day-based promotions
//!
//! Standing discounts that apply on certain weekdays, optionally within a time window, to
//! some categories, products or restaurants.

use jiff::{
    Timestamp,
    civil::{DateTime, Time, Weekday},
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::ids::{ProductId, PromotionId, RestaurantId};

pub mod discount;
pub mod matcher;

pub use discount::{PromotionPrice, calculate_promotion_discount};
pub use matcher::{
    active_promotions, day_name, is_promotion_active, promotion_for_category,
    promotion_for_product,
};

/// How much a promotion takes off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromotionDiscount<'a> {
    /// Percentage of the price (e.g. `20` for 20 %).
    Percentage(Decimal),

    /// Fixed amount, never more than the price.
    FixedAmount(Money<'a, Currency>),
}

/// Errors building a time window.
#[derive(Debug, Error)]
pub enum TimeWindowError {
    /// A bound was not a time of day.
    #[error("invalid time `{value}`")]
    InvalidTime {
        /// The offending value
        value: String,

        /// Parse failure
        #[source]
        source: jiff::Error,
    },
}

/// Daily window a promotion is limited to, inclusive at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: Time,
    end: Time,
}

impl TimeWindow {
    /// Window from `start` to `end`.
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Parse `HH:MM` (or `HH:MM:SS`) bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeWindowError`] if either bound is not a time of day.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeWindowError> {
        Ok(Self::new(parse_time(start)?, parse_time(end)?))
    }

    /// Window start.
    pub fn start(&self) -> Time {
        self.start
    }

    /// Window end.
    pub fn end(&self) -> Time {
        self.end
    }

    /// True if `time` falls within the window; seconds are ignored.
    pub fn contains(&self, time: Time) -> bool {
        let minute = minute_of_day(time);

        minute_of_day(self.start) <= minute && minute <= minute_of_day(self.end)
    }
}

fn parse_time(value: &str) -> Result<Time, TimeWindowError> {
    value
        .trim()
        .parse()
        .map_err(|source| TimeWindowError::InvalidTime {
            value: value.to_string(),
            source,
        })
}

fn minute_of_day(time: Time) -> i32 {
    i32::from(time.hour()) * 60 + i32::from(time.minute())
}

/// A standing weekday promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBasedPromotion<'a> {
    /// Promotion identifier
    pub id: PromotionId,

    /// Display title
    pub title: String,

    /// Display description
    pub description: String,

    /// Discount granted
    pub discount: PromotionDiscount<'a>,

    /// Weekdays the promotion runs on
    pub applicable_days: SmallVec<[Weekday; 7]>,

    /// Categories covered; empty covers every category
    pub applicable_categories: Vec<String>,

    /// Products covered; when set, takes over from the categories
    pub applicable_products: Vec<ProductId>,

    /// Restaurants covered; empty covers every restaurant
    pub applicable_restaurants: Vec<RestaurantId>,

    /// Daily window; `None` runs all day
    pub window: Option<TimeWindow>,

    /// Whether staff enabled the promotion
    pub is_active: bool,

    /// Creation time
    pub created_at: Timestamp,

    /// Last update time
    pub updated_at: Timestamp,
}

impl DayBasedPromotion<'_> {
    /// True if the promotion runs on `weekday`.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.applicable_days.contains(&weekday)
    }

    /// True if `time` is within the window, or there is no window.
    pub fn runs_at(&self, time: Time) -> bool {
        self.window.is_none_or(|window| window.contains(time))
    }

    /// True if the promotion covers `restaurant`.
    ///
    /// A restricted promotion never covers an unknown restaurant.
    pub fn covers_restaurant(&self, restaurant: Option<RestaurantId>) -> bool {
        if self.applicable_restaurants.is_empty() {
            return true;
        }

        restaurant.is_some_and(|restaurant| self.applicable_restaurants.contains(&restaurant))
    }

    /// True if the promotion covers `category`.
    pub fn covers_category(&self, category: &str) -> bool {
        self.applicable_categories.is_empty()
            || self
                .applicable_categories
                .iter()
                .any(|covered| covered == category)
    }

    /// True if the promotion lists specific products.
    pub fn is_product_specific(&self) -> bool {
        !self.applicable_products.is_empty()
    }

    /// True if the promotion is enabled and running at `now` for `restaurant`.
    pub fn is_running(&self, now: DateTime, restaurant: Option<RestaurantId>) -> bool {
        self.is_active
            && self.runs_on(now.weekday())
            && self.runs_at(now.time())
            && self.covers_restaurant(restaurant)
    }
}
