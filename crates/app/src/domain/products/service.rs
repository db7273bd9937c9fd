//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::{Money, iso::Currency};

use carte::{ids::ProductId, menu::CatalogProduct};

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError, records::ProductRecord, repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    currency: &'static Currency,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            currency,
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(
        name = "products.service.get_product",
        skip_all,
        fields(product = %product),
        err
    )]
    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<CatalogProduct<'static>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        into_catalog_product(record, self.currency)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<CatalogProduct<'static>, ProductsServiceError>;
}

fn into_catalog_product(
    record: ProductRecord,
    currency: &'static Currency,
) -> Result<CatalogProduct<'static>, ProductsServiceError> {
    u64::try_from(record.price)?;

    Ok(CatalogProduct {
        id: record.id,
        name: record.name,
        description: record.description,
        price: Money::from_minor(record.price, currency),
        image_url: record.image_url,
    })
}
