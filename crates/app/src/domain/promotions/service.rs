//! Promotions Service

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use tracing::{Span, error, warn};

use carte::promotions::DayBasedPromotion;

use crate::{
    database::Db,
    domain::promotions::{
        PromotionsServiceError, records::PromotionRecord, repository::PgPromotionsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
    currency: &'static Currency,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
            currency,
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip_all,
        fields(
            promotion_count = tracing::field::Empty,
            skipped_count = tracing::field::Empty
        ),
        err
    )]
    async fn list_promotions(
        &self,
    ) -> Result<Vec<DayBasedPromotion<'static>>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_promotions(&mut tx).await?;

        tx.commit().await?;

        let total = records.len();
        let promotions = into_promotions(records, self.currency);

        let span = Span::current();

        span.record("promotion_count", promotions.len());
        span.record("skipped_count", total - promotions.len());

        Ok(promotions)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Retrieves the enabled promotions, newest first.
    async fn list_promotions(
        &self,
    ) -> Result<Vec<DayBasedPromotion<'static>>, PromotionsServiceError>;
}

/// Loads promotions, falling back to none when loading fails.
pub async fn load_promotions_or_empty(
    promotions: &dyn PromotionsService,
) -> Vec<DayBasedPromotion<'static>> {
    match promotions.list_promotions().await {
        Ok(promotions) => promotions,
        Err(source) => {
            error!("failed to load day-based promotions: {source}");

            Vec::new()
        }
    }
}

/// Converts stored rows, skipping those that cannot be evaluated.
fn into_promotions(
    records: Vec<PromotionRecord>,
    currency: &'static Currency,
) -> Vec<DayBasedPromotion<'static>> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id;

            record
                .into_promotion(currency)
                .inspect_err(|source| warn!(promotion = %id, "skipping promotion: {source}"))
                .ok()
        })
        .collect()
}
