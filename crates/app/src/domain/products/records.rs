//! Product Records

use carte::ids::ProductId;

/// A `products` row as stored; the price is in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image_url: Option<String>,
}
