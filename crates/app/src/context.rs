//! App Context

use std::{sync::Arc, time::Duration};

use jiff::tz::TimeZone;
use rusty_money::iso::{self, Currency};
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use carte::offers::{FreeDessertTable, OfferSettings};

use crate::{
    database::{self, Db},
    domain::{
        events::{EventsService, PgEventsService},
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
    },
    offers::{DEFAULT_REVEAL_DELAY, OfferDriver},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migration(#[source] MigrateError),
}

/// Engine settings shared by every service.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Currency prices are stored in
    pub currency: &'static Currency,

    /// Free-dessert offer configuration
    pub offers: OfferSettings,

    /// Delay before a loaded free dessert is shown
    pub reveal_delay: Duration,

    /// Apply migrations on startup
    pub run_migrations: bool,

    /// Time zone the restaurants' days and opening hours are read in
    pub time_zone: TimeZone,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: iso::EUR,
            offers: OfferSettings::new(FreeDessertTable::default()),
            reveal_delay: DEFAULT_REVEAL_DELAY,
            run_migrations: false,
            time_zone: TimeZone::system(),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub events: Arc<dyn EventsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub products: Arc<dyn ProductsService>,
    pub offers: OfferDriver,
    pub settings: AppSettings,
}

impl AppContext {
    /// Build the context around already constructed services.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventsService>,
        promotions: Arc<dyn PromotionsService>,
        products: Arc<dyn ProductsService>,
        settings: AppSettings,
    ) -> Self {
        let offers = OfferDriver::new(Arc::clone(&products), settings.reveal_delay);

        Self {
            events,
            promotions,
            products,
            offers,
            settings,
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migration)?;

            info!("database migrations applied");
        }

        let db = Db::new(pool);
        let currency = settings.currency;

        Ok(Self::new(
            Arc::new(PgEventsService::new(db.clone())),
            Arc::new(PgPromotionsService::new(db.clone(), currency)),
            Arc::new(PgProductsService::new(db, currency)),
            settings,
        ))
    }
}
