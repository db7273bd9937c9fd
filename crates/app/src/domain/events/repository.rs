//! Events Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use carte::ids::{EventId, RestaurantId, TypedUuid};

use crate::domain::events::records::{EventProductRecord, SpecialEventRecord};

const LIST_UPCOMING_EVENTS_SQL: &str = include_str!("sql/list_upcoming_events.sql");
const LIST_EVENT_PRODUCTS_SQL: &str = include_str!("sql/list_event_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEventsRepository;

impl PgEventsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Events whose date is not yet past, whatever their state or restaurant.
    pub(crate) async fn list_upcoming_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        today: Date,
    ) -> Result<Vec<SpecialEventRecord>, sqlx::Error> {
        query_as::<Postgres, SpecialEventRecord>(LIST_UPCOMING_EVENTS_SQL)
            .bind(SqlxDate::from(today))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_event_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        events: &[EventId],
    ) -> Result<Vec<EventProductRecord>, sqlx::Error> {
        let events: Vec<Uuid> = events.iter().copied().map(EventId::into_uuid).collect();

        query_as::<Postgres, EventProductRecord>(LIST_EVENT_PRODUCTS_SQL)
            .bind(events)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SpecialEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: EventId::from_uuid(row.try_get("id")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            event_date: row.try_get::<SqlxDate, _>("event_date")?.to_jiff(),
            preorder_start: row.try_get::<SqlxDate, _>("preorder_start")?.to_jiff(),
            preorder_end: row.try_get::<SqlxDate, _>("preorder_end")?.to_jiff(),
            restrict_menu_on_event: row.try_get("restrict_menu_on_event")?,
            allowed_categories: row.try_get("allowed_categories")?,
            is_active: row.try_get("is_active")?,
            restaurant_id: row
                .try_get::<Option<Uuid>, _>("restaurant_id")?
                .map(RestaurantId::from_uuid),
            delivery_enabled: row.try_get("delivery_enabled")?,
            pickup_enabled: row.try_get("pickup_enabled")?,
            time_slots: row.try_get::<Option<Value>, _>("time_slots")?,
            free_desserts_enabled: row.try_get("free_desserts_enabled")?,
            image_url: row.try_get("image_url")?,
            banner_title: row.try_get("banner_title")?,
            banner_description: row.try_get("banner_description")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for EventProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TypedUuid::from_uuid(row.try_get("id")?),
            event_id: TypedUuid::from_uuid(row.try_get("event_id")?),
            product_id: TypedUuid::from_uuid(row.try_get("product_id")?),
        })
    }
}
