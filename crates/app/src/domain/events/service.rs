//! Events service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::{Span, error};

use carte::{
    events::{EventCatalog, EventProduct, SpecialEvent},
    ids::{EventId, RestaurantId},
};

use crate::{
    database::Db,
    domain::events::{
        errors::EventsServiceError,
        records::{EventProductRecord, SpecialEventRecord},
        repository::PgEventsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgEventsService {
    db: Db,
    repository: PgEventsRepository,
}

impl PgEventsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgEventsRepository::new(),
        }
    }
}

#[async_trait]
impl EventsService for PgEventsService {
    #[tracing::instrument(
        name = "events.service.load_catalog",
        skip_all,
        fields(
            today = %today,
            restaurant = ?restaurant,
            event_count = tracing::field::Empty,
            link_count = tracing::field::Empty
        ),
        err
    )]
    async fn load_catalog(
        &self,
        restaurant: Option<RestaurantId>,
        today: Date,
    ) -> Result<EventCatalog, EventsServiceError> {
        let mut tx = self.db.begin().await?;

        let events = self.repository.list_upcoming_events(&mut tx, today).await?;

        let links = if events.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<EventId> = events.iter().map(|event| event.id).collect();

            self.repository.list_event_products(&mut tx, &ids).await?
        };

        tx.commit().await?;

        let catalog = catalog_from_records(events, links, today, restaurant);

        let span = Span::current();

        span.record("event_count", catalog.events().len());
        span.record("link_count", catalog.links().len());

        Ok(catalog)
    }
}

#[automock]
#[async_trait]
pub trait EventsService: Send + Sync {
    /// Loads the events open on `today` for `restaurant` (global events only without one),
    /// along with their product links.
    async fn load_catalog(
        &self,
        restaurant: Option<RestaurantId>,
        today: Date,
    ) -> Result<EventCatalog, EventsServiceError>;
}

/// The catalog of events open on `today` for `restaurant`, built from stored rows.
fn catalog_from_records(
    events: Vec<SpecialEventRecord>,
    links: Vec<EventProductRecord>,
    today: Date,
    restaurant: Option<RestaurantId>,
) -> EventCatalog {
    EventCatalog::open_on(
        events.into_iter().map(SpecialEvent::from).collect(),
        links.into_iter().map(EventProduct::from).collect(),
        today,
        restaurant,
    )
}

/// Loads the event catalog, falling back to an empty catalog when loading fails.
pub async fn load_catalog_or_empty(
    events: &dyn EventsService,
    restaurant: Option<RestaurantId>,
    today: Date,
) -> EventCatalog {
    match events.load_catalog(restaurant, today).await {
        Ok(catalog) => catalog,
        Err(source) => {
            error!("failed to load special events: {source}");

            EventCatalog::empty()
        }
    }
}
