//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use carte::ids::{PromotionId, TypedUuid};

use crate::domain::promotions::records::PromotionRecord;

const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LIST_PROMOTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

fn typed_ids<T>(ids: Option<Vec<Uuid>>) -> Option<Vec<TypedUuid<T>>> {
    ids.map(|ids| ids.into_iter().map(TypedUuid::from_uuid).collect())
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: PromotionId::from_uuid(row.try_get("id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            discount: row.try_get("discount")?,
            is_percentage: row.try_get("is_percentage")?,
            applicable_days: row.try_get("applicable_days")?,
            applicable_categories: row.try_get("applicable_categories")?,
            applicable_products: typed_ids(row.try_get("applicable_products")?),
            applicable_restaurants: typed_ids(row.try_get("applicable_restaurants")?),
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
