//! Event exclusivity
//!
//! Event products and regular products cannot share a cart. Once one side is in the cart the
//! menu hides the other side; desserts and drinks remain available to both.

use crate::{events::classifier::CartEventInfo, menu::MenuCategory};

/// Filter menu categories according to what the cart already holds.
///
/// - Event product in the cart: dessert and drink categories are kept whole, every other
///   category is reduced to event products.
/// - Otherwise, regular product in the cart: event products are removed everywhere.
/// - Otherwise the menu is returned unchanged.
///
/// Categories emptied by the filter are dropped.
pub fn filter_categories_for_event_exclusivity<'a>(
    categories: Vec<MenuCategory<'a>>,
    info: &CartEventInfo,
) -> Vec<MenuCategory<'a>> {
    let event_products = info.event_product_set();

    if info.has_event_products {
        categories
            .into_iter()
            .filter_map(|category| {
                if category.kind.is_event_companion() {
                    Some(category)
                } else {
                    category.retain_items(|item| event_products.contains(&item.id))
                }
            })
            .collect()
    } else if info.has_non_event_products {
        categories
            .into_iter()
            .filter_map(|category| {
                category.retain_items(|item| !event_products.contains(&item.id))
            })
            .collect()
    } else {
        categories
    }
}
