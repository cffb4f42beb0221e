use async_trait::async_trait;

use crate::create::{NewProduct, UploadFile};
use crate::ledger::IdSet;
use crate::models::{Product, ProductCard, ProductId};
use crate::Result;

/// A remote product catalog.
///
/// Both DummyJSON and the Airtable product table implement this, so the
/// store can merge them without caring where a product lives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product header the catalog has
    async fn list_products(&self) -> Result<Vec<ProductCard>>;

    async fn get_product(&self, id: &ProductId) -> Result<Product>;
}

/// Catalog that accepts new products
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductWriter: Send + Sync {
    /// Returns the id the backend assigned
    async fn create_product(&self, product: &NewProduct) -> Result<ProductId>;
}

/// A single-record id ledger (favorites or deleted).
///
/// There is no per-id endpoint: `write` replaces the whole set and returns
/// what the backend echoed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn read(&self) -> Result<IdSet>;

    async fn write(&self, ids: &IdSet) -> Result<IdSet>;
}

/// Image hosting; returns the hosted URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(&self, file: &UploadFile) -> Result<String>;
}
