//! Engine Config

use std::time::Duration;

use clap::Args;
use jiff::tz::TimeZone;
use rusty_money::iso;
use thiserror::Error;

use carte::offers::{DEFAULT_FREE_DESSERT_MARKER, FreeDessertTable, OfferSettings};
use carte_app::context::AppSettings;

/// Errors resolving engine settings.
#[derive(Debug, Error)]
pub enum EngineConfigError {
    /// The currency code is not an ISO 4217 currency.
    #[error("unknown currency `{0}`")]
    UnknownCurrency(String),

    /// The time zone is not in the time zone database.
    #[error("unknown time zone `{name}`")]
    UnknownTimeZone {
        /// Configured name
        name: String,

        /// Lookup failure
        #[source]
        source: jiff::Error,
    },
}

/// Event and promotion engine settings.
#[derive(Debug, Args)]
pub struct EngineConfig {
    /// ISO 4217 code of the currency prices are stored in
    #[arg(long, env = "CURRENCY", default_value = "EUR")]
    pub currency: String,

    /// Time zone restaurant days and opening hours are read in
    #[arg(long, env = "TIME_ZONE", default_value = "Europe/Paris")]
    pub time_zone: String,

    /// Free dessert per restaurant, as `<restaurant>=<product>,...`
    #[arg(long, env = "FREE_DESSERTS")]
    pub free_desserts: Option<FreeDessertTable>,

    /// Marker written into free dessert cart lines
    #[arg(long, env = "FREE_DESSERT_MARKER", default_value = DEFAULT_FREE_DESSERT_MARKER)]
    pub free_dessert_marker: String,

    /// Delay before a loaded free dessert is shown
    #[arg(long, env = "FREE_DESSERT_REVEAL_DELAY_MS", default_value_t = 100_u64)]
    pub free_dessert_reveal_delay_ms: u64,
}

impl EngineConfig {
    /// Resolve into application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency or time zone is unknown.
    pub fn app_settings(&self, run_migrations: bool) -> Result<AppSettings, EngineConfigError> {
        let currency = iso::find(&self.currency)
            .ok_or_else(|| EngineConfigError::UnknownCurrency(self.currency.clone()))?;

        let time_zone =
            TimeZone::get(&self.time_zone).map_err(|source| EngineConfigError::UnknownTimeZone {
                name: self.time_zone.clone(),
                source,
            })?;

        let offers = OfferSettings::new(self.free_desserts.clone().unwrap_or_default())
            .with_marker(self.free_dessert_marker.clone());

        Ok(AppSettings {
            currency,
            offers,
            reveal_delay: Duration::from_millis(self.free_dessert_reveal_delay_ms),
            run_migrations,
            time_zone,
        })
    }
}
