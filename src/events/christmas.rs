//! Christmas mode
//!
//! On Christmas day the menu can be restricted to the Christmas products plus a few
//! allowed categories. Without an active Christmas event nothing here has any effect.

use jiff::civil::Date;
use rustc_hash::FxHashSet;

use crate::{
    events::{EventCatalog, SpecialEvent},
    ids::ProductId,
    menu::MenuCategory,
};

/// True if the event is the Christmas campaign, going by its slug or name.
pub fn is_christmas_event(event: &SpecialEvent) -> bool {
    let name = event.name.to_lowercase();

    event.slug.contains("noel") || name.contains("noël") || name.contains("noel")
}

/// Christmas view over the active events for one day.
#[derive(Debug, Clone, Copy)]
pub struct ChristmasMode<'c> {
    catalog: &'c EventCatalog,
    event: Option<&'c SpecialEvent>,
    today: Date,
}

impl<'c> ChristmasMode<'c> {
    /// Locate the first active Christmas event in `catalog`.
    pub fn new(catalog: &'c EventCatalog, today: Date) -> Self {
        Self {
            catalog,
            event: catalog.events().iter().find(|event| is_christmas_event(event)),
            today,
        }
    }

    /// The Christmas event, if one is active.
    pub fn event(&self) -> Option<&'c SpecialEvent> {
        self.event
    }

    /// Date of the Christmas event.
    pub fn event_date(&self) -> Option<Date> {
        self.event.map(|event| event.event_date)
    }

    /// True only on the Christmas event date itself.
    pub fn is_christmas_mode(&self) -> bool {
        self.event
            .is_some_and(|event| event.is_event_day(self.today))
    }

    /// True during the Christmas pre-order period.
    pub fn is_preorder_mode(&self) -> bool {
        self.event
            .is_some_and(|event| event.is_preorder_period(self.today))
    }

    /// True if the product's event is the Christmas event.
    pub fn is_christmas_product(&self, product: ProductId) -> bool {
        match (self.event, self.catalog.event_for_product(product)) {
            (Some(christmas), Some(event)) => christmas.id == event.id,
            _ => false,
        }
    }

    /// Products linked to the Christmas event.
    pub fn christmas_product_ids(&self) -> Vec<ProductId> {
        self.event
            .map(|event| self.catalog.product_ids_for_event(event.id))
            .unwrap_or_default()
    }

    /// Restrict the menu on Christmas day.
    ///
    /// Unless it is Christmas day and the event restricts the menu, the categories are
    /// returned unchanged. Otherwise categories whose id or name matches an allowed
    /// category are kept whole, and the rest are reduced to Christmas products, dropping
    /// those left empty.
    pub fn filter_menu<'a>(&self, categories: Vec<MenuCategory<'a>>) -> Vec<MenuCategory<'a>> {
        let Some(event) = self.event else {
            return categories;
        };

        if !event.is_event_day(self.today) || !event.restrict_menu_on_event {
            return categories;
        }

        let products: FxHashSet<ProductId> = self.christmas_product_ids().into_iter().collect();

        categories
            .into_iter()
            .filter_map(|category| {
                let allowed = event
                    .allowed_categories()
                    .iter()
                    .any(|label| category.matches_label(label));

                if allowed {
                    Some(category)
                } else {
                    category.retain_items(|item| products.contains(&item.id))
                }
            })
            .collect()
    }
}
