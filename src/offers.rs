//! Free-dessert offers
//!
//! When a customer adds an event product, they may be offered a free dessert. The offer
//! moves through `Idle`, `Loading` (the dessert is being fetched) and `Offering` (the
//! dessert is shown) and always ends back in `Idle`.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    events::EventCatalog,
    ids::{ProductId, RestaurantId},
    menu::{CatalogProduct, MenuItem},
    pricing::zero,
};

/// Default marker identifying accepted free desserts in cart line instructions.
pub const DEFAULT_FREE_DESSERT_MARKER: &str = "Dessert offert";

/// Category free desserts are listed under.
pub const FREE_DESSERT_CATEGORY: &str = "desserts";

/// Errors parsing a free-dessert table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FreeDessertTableError {
    /// An entry was not `restaurant=product`.
    #[error("invalid free dessert entry `{0}`, expected `<restaurant>=<product>`")]
    InvalidEntry(String),

    /// An id in an entry was not a UUID.
    #[error("invalid id in free dessert entry `{entry}`")]
    InvalidId {
        /// The offending entry
        entry: String,

        /// Parse failure
        #[source]
        source: uuid::Error,
    },
}

/// Which dessert each restaurant gives away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeDessertTable {
    desserts: FxHashMap<RestaurantId, ProductId>,
}

impl FreeDessertTable {
    /// Build a table from `(restaurant, dessert)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (RestaurantId, ProductId)>) -> Self {
        Self {
            desserts: entries.into_iter().collect(),
        }
    }

    /// The dessert offered by `restaurant`.
    pub fn dessert_for(&self, restaurant: RestaurantId) -> Option<ProductId> {
        self.desserts.get(&restaurant).copied()
    }

    /// Number of configured restaurants.
    pub fn len(&self) -> usize {
        self.desserts.len()
    }

    /// True if no restaurant gives desserts away.
    pub fn is_empty(&self) -> bool {
        self.desserts.is_empty()
    }
}

impl FromStr for FreeDessertTable {
    type Err = FreeDessertTableError;

    /// Parse `<restaurant>=<product>` entries separated by commas. Blank entries are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| -> Result<(RestaurantId, ProductId), FreeDessertTableError> {
                let (restaurant, product) = entry
                    .split_once('=')
                    .ok_or_else(|| FreeDessertTableError::InvalidEntry(entry.to_string()))?;

                let invalid_id = |source| FreeDessertTableError::InvalidId {
                    entry: entry.to_string(),
                    source,
                };

                Ok((
                    restaurant.parse().map_err(invalid_id)?,
                    product.parse().map_err(invalid_id)?,
                ))
            })
            .collect::<Result<FxHashMap<_, _>, _>>()
            .map(|desserts| Self { desserts })
    }
}

/// Configuration for the offer controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferSettings {
    /// Dessert given away by each restaurant
    pub desserts: FreeDessertTable,

    /// Marker written into accepted free dessert lines
    pub marker: String,
}

impl OfferSettings {
    /// Settings using the default marker.
    pub fn new(desserts: FreeDessertTable) -> Self {
        Self {
            desserts,
            marker: DEFAULT_FREE_DESSERT_MARKER.to_string(),
        }
    }

    /// Replace the marker.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

/// Where the offer currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferState<'a> {
    /// No offer in progress.
    Idle,

    /// Waiting for the dessert product to be fetched.
    Loading {
        /// Event product that triggered the offer
        trigger: ProductId,

        /// Restaurant the cart belongs to
        restaurant: RestaurantId,

        /// Dessert being fetched
        dessert: ProductId,
    },

    /// Dessert shown to the customer.
    Offering {
        /// Event product that triggered the offer
        trigger: ProductId,

        /// Restaurant the cart belongs to
        restaurant: RestaurantId,

        /// The free dessert
        dessert: MenuItem<'a>,
    },
}

/// Why a trigger did not start an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// The product added is not linked to an event.
    NotEventProduct,

    /// The restaurant has no free dessert configured.
    NoDessertConfigured,

    /// Every event product unit already has its free dessert.
    QuotaExhausted {
        /// Free desserts already in the cart
        free_desserts: u64,

        /// Event product units in the cart
        event_units: u64,
    },
}

/// Result of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Fetch this dessert, then call [`FreeDessertOffer::dessert_loaded`].
    Load(ProductId),

    /// No offer.
    Suppressed(Suppression),
}

/// Illegal offer transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferError {
    /// An offer is already loading or showing.
    #[error("a free dessert offer is already in progress")]
    Busy,

    /// No dessert is being loaded.
    #[error("no free dessert is being loaded")]
    NotLoading,

    /// The loaded product is not the dessert that was requested.
    #[error("loaded product {loaded} does not match requested dessert {requested}")]
    UnexpectedProduct {
        /// Dessert requested by the trigger
        requested: ProductId,

        /// Product that was loaded
        loaded: ProductId,
    },
}

/// The free-dessert offer controller for one customer session.
#[derive(Debug, Clone)]
pub struct FreeDessertOffer<'a> {
    settings: OfferSettings,
    state: OfferState<'a>,
}

impl<'a> FreeDessertOffer<'a> {
    /// Create an idle controller.
    pub fn new(settings: OfferSettings) -> Self {
        Self {
            settings,
            state: OfferState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &OfferState<'a> {
        &self.state
    }

    /// Controller settings.
    pub fn settings(&self) -> &OfferSettings {
        &self.settings
    }

    /// True while the dessert is shown.
    pub fn is_visible(&self) -> bool {
        matches!(self.state, OfferState::Offering { .. })
    }

    /// React to `trigger` having been added to the cart.
    ///
    /// `cart` must already contain the added unit.
    ///
    /// # Errors
    ///
    /// - [`OfferError::Busy`]: an offer is already loading or showing.
    pub fn trigger(
        &mut self,
        trigger: ProductId,
        restaurant: RestaurantId,
        cart: &Cart<'_>,
        catalog: &EventCatalog,
    ) -> Result<TriggerOutcome, OfferError> {
        if self.state != OfferState::Idle {
            return Err(OfferError::Busy);
        }

        if !catalog.is_event_product(trigger) {
            return Ok(TriggerOutcome::Suppressed(Suppression::NotEventProduct));
        }

        let Some(dessert) = self.settings.desserts.dessert_for(restaurant) else {
            return Ok(TriggerOutcome::Suppressed(Suppression::NoDessertConfigured));
        };

        let free_desserts = accepted_free_desserts(cart, &self.settings.marker);
        let event_units = event_units_in_cart(cart, catalog);

        if free_desserts >= event_units {
            return Ok(TriggerOutcome::Suppressed(Suppression::QuotaExhausted {
                free_desserts,
                event_units,
            }));
        }

        self.state = OfferState::Loading {
            trigger,
            restaurant,
            dessert,
        };

        Ok(TriggerOutcome::Load(dessert))
    }

    /// The dessert was fetched: show it for free.
    ///
    /// # Errors
    ///
    /// - [`OfferError::NotLoading`]: no dessert was requested.
    /// - [`OfferError::UnexpectedProduct`]: `product` is not the requested dessert.
    pub fn dessert_loaded(
        &mut self,
        product: CatalogProduct<'a>,
    ) -> Result<&MenuItem<'a>, OfferError> {
        let OfferState::Loading {
            trigger,
            restaurant,
            dessert,
        } = self.state
        else {
            return Err(OfferError::NotLoading);
        };

        if product.id != dessert {
            return Err(OfferError::UnexpectedProduct {
                requested: dessert,
                loaded: product.id,
            });
        }

        self.state = OfferState::Offering {
            trigger,
            restaurant,
            dessert: free_dessert_item(product),
        };

        match &self.state {
            OfferState::Offering { dessert, .. } => Ok(dessert),
            _ => Err(OfferError::NotLoading),
        }
    }

    /// The dessert could not be fetched; the offer is dropped.
    ///
    /// # Errors
    ///
    /// - [`OfferError::NotLoading`]: no dessert was requested.
    pub fn dessert_unavailable(&mut self) -> Result<(), OfferError> {
        if !matches!(self.state, OfferState::Loading { .. }) {
            return Err(OfferError::NotLoading);
        }

        self.state = OfferState::Idle;

        Ok(())
    }

    /// Accept the shown dessert. Returns `None` when nothing is shown.
    ///
    /// Add the item to the cart with [`FreeDessertOffer::free_dessert_line`].
    pub fn accept(&mut self) -> Option<MenuItem<'a>> {
        match std::mem::replace(&mut self.state, OfferState::Idle) {
            OfferState::Offering { dessert, .. } => Some(dessert),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Decline the shown dessert.
    pub fn decline(&mut self) {
        self.close();
    }

    /// Dismiss the offer, whatever its state.
    pub fn close(&mut self) {
        self.state = OfferState::Idle;
    }

    /// Cart line for an accepted dessert, labelled with the marker.
    pub fn free_dessert_line(
        &self,
        dessert: MenuItem<'a>,
        event_name: Option<&str>,
    ) -> CartLine<'a> {
        let instructions = match event_name {
            Some(event) => format!("{} ({event})", self.settings.marker),
            None => self.settings.marker.clone(),
        };

        CartLine::new(dessert, 1).with_instructions(instructions)
    }
}

/// Units of free desserts already accepted, recognised by `marker` in the line instructions.
pub fn accepted_free_desserts(cart: &Cart<'_>, marker: &str) -> u64 {
    cart.lines()
        .iter()
        .filter(|line| line.has_marker(marker))
        .map(|line| u64::from(line.quantity))
        .sum()
}

/// Units of event products in the cart.
pub fn event_units_in_cart(cart: &Cart<'_>, catalog: &EventCatalog) -> u64 {
    cart.lines()
        .iter()
        .filter(|line| catalog.is_event_product(line.product_id()))
        .map(|line| u64::from(line.quantity))
        .sum()
}

fn free_dessert_item(product: CatalogProduct<'_>) -> MenuItem<'_> {
    let mut item = MenuItem::new(
        product.id,
        product.name,
        FREE_DESSERT_CATEGORY,
        zero(product.price.currency()),
    );

    item.original_price = Some(product.price);
    item.description = product.description;
    item.image_url = product.image_url;

    item
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::events::test_support::{event, link};

    use super::*;

    struct Fixture {
        restaurant: RestaurantId,
        dessert: ProductId,
        bundle: ProductId,
        catalog: EventCatalog,
    }

    fn fixture() -> Fixture {
        let restaurant = RestaurantId::new();
        let dessert = ProductId::new();
        let bundle = ProductId::new();
        let valentin = event("Saint Valentin", "st-valentin", date(2026, 2, 14));
        let catalog = EventCatalog::new(vec![valentin.clone()], vec![link(&valentin, bundle)]);

        Fixture {
            restaurant,
            dessert,
            bundle,
            catalog,
        }
    }

    fn offer(fixture: &Fixture) -> FreeDessertOffer<'static> {
        FreeDessertOffer::new(OfferSettings::new(FreeDessertTable::new([(
            fixture.restaurant,
            fixture.dessert,
        )])))
    }

    fn bundle_line(fixture: &Fixture, quantity: u32) -> CartLine<'static> {
        CartLine::new(
            MenuItem::new(
                fixture.bundle,
                "Box Saint Valentin",
                "plateaux",
                Money::from_minor(4500, iso::EUR),
            ),
            quantity,
        )
    }

    fn catalog_dessert(id: ProductId) -> CatalogProduct<'static> {
        CatalogProduct {
            id,
            name: "Mochi".to_string(),
            description: None,
            price: Money::from_minor(550, iso::EUR),
            image_url: None,
        }
    }

    #[test]
    fn parses_free_dessert_table() -> TestResult {
        let restaurant = RestaurantId::new();
        let dessert = ProductId::new();

        let table: FreeDessertTable = format!(" {restaurant}={dessert} ,").parse()?;

        assert_eq!(table.dessert_for(restaurant), Some(dessert));
        assert_eq!(table.len(), 1);

        Ok(())
    }

    #[test]
    fn rejects_malformed_table_entries() {
        assert!(matches!(
            "no-equals-sign".parse::<FreeDessertTable>(),
            Err(FreeDessertTableError::InvalidEntry(_))
        ));
        assert!(matches!(
            "abc=def".parse::<FreeDessertTable>(),
            Err(FreeDessertTableError::InvalidId { .. })
        ));
    }

    #[test]
    fn full_offer_cycle() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let cart = Cart::with_lines([bundle_line(&fixture, 1)], iso::EUR)?;

        let outcome = offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?;
        assert_eq!(outcome, TriggerOutcome::Load(fixture.dessert));
        assert!(!offer.is_visible());

        let shown = offer.dessert_loaded(catalog_dessert(fixture.dessert))?;
        assert_eq!(shown.price, Money::from_minor(0, iso::EUR));
        assert_eq!(shown.original_price, Some(Money::from_minor(550, iso::EUR)));
        assert!(offer.is_visible());

        let accepted = offer.accept().ok_or("nothing accepted")?;
        let line = offer.free_dessert_line(accepted, Some("Saint Valentin"));

        assert_eq!(offer.state(), &OfferState::Idle);
        assert_eq!(
            line.special_instructions.as_deref(),
            Some("Dessert offert (Saint Valentin)")
        );

        Ok(())
    }

    #[test]
    fn retrigger_while_pending_is_busy() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let cart = Cart::with_lines([bundle_line(&fixture, 2)], iso::EUR)?;

        offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?;

        assert_eq!(
            offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog),
            Err(OfferError::Busy)
        );

        Ok(())
    }

    #[test]
    fn suppressed_triggers() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let regular = ProductId::new();
        let cart = Cart::with_lines([bundle_line(&fixture, 1)], iso::EUR)?;

        assert_eq!(
            offer.trigger(regular, fixture.restaurant, &cart, &fixture.catalog)?,
            TriggerOutcome::Suppressed(Suppression::NotEventProduct)
        );
        assert_eq!(
            offer.trigger(fixture.bundle, RestaurantId::new(), &cart, &fixture.catalog)?,
            TriggerOutcome::Suppressed(Suppression::NoDessertConfigured)
        );
        assert_eq!(offer.state(), &OfferState::Idle);

        Ok(())
    }

    #[test]
    fn quota_allows_one_dessert_per_event_unit() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let mut cart = Cart::with_lines([bundle_line(&fixture, 2)], iso::EUR)?;

        for _ in 0..2 {
            offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?;
            offer.dessert_loaded(catalog_dessert(fixture.dessert))?;

            let dessert = offer.accept().ok_or("nothing accepted")?;
            cart.push(offer.free_dessert_line(dessert, None))?;
        }

        assert_eq!(
            offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?,
            TriggerOutcome::Suppressed(Suppression::QuotaExhausted {
                free_desserts: 2,
                event_units: 2
            })
        );

        Ok(())
    }

    #[test]
    fn unavailable_dessert_returns_to_idle() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let cart = Cart::with_lines([bundle_line(&fixture, 1)], iso::EUR)?;

        offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?;
        offer.dessert_unavailable()?;

        assert_eq!(offer.state(), &OfferState::Idle);
        assert_eq!(offer.dessert_unavailable(), Err(OfferError::NotLoading));

        Ok(())
    }

    #[test]
    fn wrong_product_keeps_loading() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let cart = Cart::with_lines([bundle_line(&fixture, 1)], iso::EUR)?;

        offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?;

        let result = offer.dessert_loaded(catalog_dessert(ProductId::new()));

        assert!(matches!(result, Err(OfferError::UnexpectedProduct { .. })));
        assert!(matches!(offer.state(), OfferState::Loading { .. }));

        Ok(())
    }

    #[test]
    fn decline_and_accept_when_idle() -> TestResult {
        let fixture = fixture();
        let mut offer = offer(&fixture);
        let cart = Cart::with_lines([bundle_line(&fixture, 1)], iso::EUR)?;

        assert_eq!(offer.accept(), None);

        offer.trigger(fixture.bundle, fixture.restaurant, &cart, &fixture.catalog)?;
        offer.dessert_loaded(catalog_dessert(fixture.dessert))?;
        offer.decline();

        assert_eq!(offer.state(), &OfferState::Idle);
        assert_eq!(offer.accept(), None);

        Ok(())
    }
}
