//! Promotion Matcher

use jiff::civil::{DateTime, Weekday};

use crate::{
    ids::{ProductId, PromotionId, RestaurantId},
    promotions::DayBasedPromotion,
};

/// Promotions running at `now` for `restaurant`, in the given order.
pub fn active_promotions<'p, 'a>(
    promotions: &'p [DayBasedPromotion<'a>],
    now: DateTime,
    restaurant: Option<RestaurantId>,
) -> Vec<&'p DayBasedPromotion<'a>> {
    promotions
        .iter()
        .filter(|promotion| promotion.is_running(now, restaurant))
        .collect()
}

/// First running promotion covering `category`.
pub fn promotion_for_category<'p, 'a>(
    category: &str,
    promotions: &'p [DayBasedPromotion<'a>],
    now: DateTime,
    restaurant: Option<RestaurantId>,
) -> Option<&'p DayBasedPromotion<'a>> {
    active_promotions(promotions, now, restaurant)
        .into_iter()
        .find(|promotion| promotion.covers_category(category))
}

/// Running promotion for a product listed under `category`.
///
/// A promotion naming the product wins over one covering its category; among promotions of
/// the same kind the first wins.
pub fn promotion_for_product<'p, 'a>(
    product: ProductId,
    category: &str,
    promotions: &'p [DayBasedPromotion<'a>],
    now: DateTime,
    restaurant: Option<RestaurantId>,
) -> Option<&'p DayBasedPromotion<'a>> {
    let active = active_promotions(promotions, now, restaurant);

    active
        .iter()
        .find(|promotion| promotion.applicable_products.contains(&product))
        .or_else(|| {
            active.iter().find(|promotion| {
                !promotion.is_product_specific() && promotion.covers_category(category)
            })
        })
        .copied()
}

/// True if promotion `id` is running at `now` for `restaurant`.
pub fn is_promotion_active(
    id: PromotionId,
    promotions: &[DayBasedPromotion<'_>],
    now: DateTime,
    restaurant: Option<RestaurantId>,
) -> bool {
    promotions
        .iter()
        .any(|promotion| promotion.id == id && promotion.is_running(now, restaurant))
}

/// French name of `weekday`, as shown on promotion badges.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Dimanche",
        Weekday::Monday => "Lundi",
        Weekday::Tuesday => "Mardi",
        Weekday::Wednesday => "Mercredi",
        Weekday::Thursday => "Jeudi",
        Weekday::Friday => "Vendredi",
        Weekday::Saturday => "Samedi",
    }
}
