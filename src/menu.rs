//! Menu

use rusty_money::{Money, iso::Currency};

use crate::ids::ProductId;

/// What kind of category a product belongs to, resolved once when the menu is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Desserts (eligible for free-dessert offers).
    Dessert,

    /// Drinks.
    Drink,

    /// Everything else.
    Other,
}

impl CategoryKind {
    /// Resolve a category label using the menu's naming convention.
    ///
    /// Matching is a case-insensitive substring test, so suffixed categories such as
    /// `desserts_stmartin` still resolve. Drinks win over desserts for mixed labels.
    pub fn resolve(label: &str) -> Self {
        let label = label.to_lowercase();

        if label.contains("boisson") {
            Self::Drink
        } else if label.contains("dessert") {
            Self::Dessert
        } else {
            Self::Other
        }
    }

    /// Resolve from the first label that is not [`CategoryKind::Other`].
    pub fn resolve_any<'s>(labels: impl IntoIterator<Item = &'s str>) -> Self {
        labels
            .into_iter()
            .map(Self::resolve)
            .find(|kind| *kind != Self::Other)
            .unwrap_or(Self::Other)
    }

    /// Desserts and drinks stay orderable alongside event products.
    pub const fn is_event_companion(self) -> bool {
        matches!(self, Self::Dessert | Self::Drink)
    }
}

/// A product as it appears on the menu or in a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Category identifier the product is listed under
    pub category: String,

    /// Resolved category kind
    pub kind: CategoryKind,

    /// Unit price charged
    pub price: Money<'a, Currency>,

    /// Price before an offer zeroed or reduced it
    pub original_price: Option<Money<'a, Currency>>,

    /// Optional description
    pub description: Option<String>,

    /// Optional image
    pub image_url: Option<String>,
}

impl<'a> MenuItem<'a> {
    /// Creates a menu item, resolving its category kind from `category`.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        let category = category.into();

        Self {
            id,
            name: name.into(),
            kind: CategoryKind::resolve(&category),
            category,
            price,
            original_price: None,
            description: None,
            image_url: None,
        }
    }
}

/// A menu category with its listed items.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory<'a> {
    /// Category identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Resolved category kind
    pub kind: CategoryKind,

    /// Items listed in this category
    pub items: Vec<MenuItem<'a>>,
}

impl<'a> MenuCategory<'a> {
    /// Creates a category, resolving its kind from the id and then the name.
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: Vec<MenuItem<'a>>) -> Self {
        let id = id.into();
        let name = name.into();
        let kind = CategoryKind::resolve_any([id.as_str(), name.as_str()]);

        Self {
            id,
            name,
            kind,
            items,
        }
    }

    /// True if the id or name contains `label`, ignoring case.
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.to_lowercase();

        self.id.to_lowercase().contains(&label) || self.name.to_lowercase().contains(&label)
    }

    /// Keep only the items matching `keep`; `None` if nothing is left.
    #[must_use]
    pub fn retain_items(mut self, keep: impl FnMut(&MenuItem<'a>) -> bool) -> Option<Self> {
        self.items.retain(keep);

        if self.items.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// A product record fetched from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Catalog price
    pub price: Money<'a, Currency>,

    /// Optional image
    pub image_url: Option<String>,
}
