//! Free-dessert offer driver

use std::{sync::Arc, time::Duration};

use tracing::{debug, error, info};

use carte::{
    cart::Cart,
    events::EventCatalog,
    ids::{ProductId, RestaurantId},
    menu::MenuItem,
    offers::{FreeDessertOffer, OfferError, Suppression, TriggerOutcome},
};

use crate::domain::products::ProductsService;

/// Delay before a loaded dessert is shown.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(100);

/// How a driven offer ended.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferOutcome {
    /// The dessert is shown and waits for an answer.
    Offered(MenuItem<'static>),

    /// No offer was made.
    Suppressed(Suppression),

    /// The dessert could not be fetched.
    Unavailable,
}

/// Runs an offer from the trigger to the shown dessert.
#[derive(Clone)]
pub struct OfferDriver {
    products: Arc<dyn ProductsService>,
    reveal_delay: Duration,
}

impl OfferDriver {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, reveal_delay: Duration) -> Self {
        Self {
            products,
            reveal_delay,
        }
    }

    /// Trigger `offer`, fetch the dessert and show it after the reveal delay.
    ///
    /// # Errors
    ///
    /// Returns an error if `offer` is already busy or the catalog returned another product.
    #[tracing::instrument(
        name = "offers.driver.drive",
        skip_all,
        fields(trigger = %trigger, restaurant = %restaurant),
        err
    )]
    pub async fn drive(
        &self,
        offer: &mut FreeDessertOffer<'static>,
        trigger: ProductId,
        restaurant: RestaurantId,
        cart: &Cart<'_>,
        catalog: &EventCatalog,
    ) -> Result<OfferOutcome, OfferError> {
        let dessert = match offer.trigger(trigger, restaurant, cart, catalog)? {
            TriggerOutcome::Load(dessert) => dessert,
            TriggerOutcome::Suppressed(reason) => {
                debug!(?reason, "free dessert offer suppressed");

                return Ok(OfferOutcome::Suppressed(reason));
            }
        };

        let product = match self.products.get_product(dessert).await {
            Ok(product) => product,
            Err(source) => {
                error!(dessert = %dessert, "failed to load free dessert: {source}");

                offer.dessert_unavailable()?;

                return Ok(OfferOutcome::Unavailable);
            }
        };

        tokio::time::sleep(self.reveal_delay).await;

        match offer.dessert_loaded(product) {
            Ok(item) => {
                info!(dessert = %dessert, "free dessert offered");

                Ok(OfferOutcome::Offered(item.clone()))
            }
            Err(error) => {
                offer.close();

                Err(error)
            }
        }
    }
}
