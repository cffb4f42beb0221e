// Airtable provider - product table plus the favorite/deleted ledgers
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use storefront_api::{
    AirtableClient, AirtableError, AirtableRecord, DeletedFields, FavoriteFields, ProductFields,
};
use tracing::debug;

use crate::{
    create::NewProduct,
    ledger::{join_id_list, parse_id_list, IdSet},
    models::{ApiType, Product, ProductCard, ProductId},
    sources::{CatalogSource, LedgerSource, ProductWriter},
    Error, Result,
};

fn api_error(e: AirtableError) -> Error {
    match e {
        AirtableError::NotFound(id) => Error::NotFound(id),
        other => Error::ApiError(other.to_string()),
    }
}

/// The writable product table
pub struct AirtableCatalog {
    client: AirtableClient,
}

impl AirtableCatalog {
    pub fn new(client: AirtableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for AirtableCatalog {
    async fn list_products(&self) -> Result<Vec<ProductCard>> {
        let records = self
            .client
            .list_records::<ProductFields>()
            .await
            .map_err(api_error)?;

        Ok(records.iter().map(record_to_card).collect())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product> {
        let record = self
            .client
            .get_record::<ProductFields>(&id.to_string())
            .await
            .map_err(api_error)?;

        record_to_product(record)
    }
}

#[async_trait]
impl ProductWriter for AirtableCatalog {
    async fn create_product(&self, product: &NewProduct) -> Result<ProductId> {
        let fields = new_product_fields(product)?;
        let record: AirtableRecord<ProductFields> = self
            .client
            .create_record(&fields)
            .await
            .map_err(api_error)?;

        debug!("Airtable assigned {} to {:?}", record.id, record.fields.title);
        Ok(ProductId::parse(&record.id))
    }
}

fn record_to_card(record: &AirtableRecord<ProductFields>) -> ProductCard {
    ProductCard {
        id: ProductId::parse(&record.id),
        title: record.fields.title.clone(),
        description: record.fields.description.clone(),
        thumbnail: record.fields.thumbnail.clone(),
        price: record.fields.price,
        api_type: ApiType::Airtable,
    }
}

/// Decode one of the JSON-in-a-string columns; a blank cell is the default
fn decode_column<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T> {
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

/// Convert an Airtable row into our Product model, unpacking nested JSON
fn record_to_product(record: AirtableRecord<ProductFields>) -> Result<Product> {
    let card = record_to_card(&record);
    let fields = record.fields;

    Ok(Product {
        card,
        category: fields.category,
        rating: fields.rating.unwrap_or_default(),
        stock: fields.stock,
        brand: fields.brand,
        sku: fields.sku,
        weight: fields.weight,
        warranty_information: fields.warranty_information,
        shipping_information: fields.shipping_information,
        availability_status: fields.availability_status,
        return_policy: fields.return_policy,
        minimum_order_quantity: fields.minimum_order_quantity,
        dimensions: decode_column(fields.dimensions.as_deref())?,
        meta: decode_column(fields.meta.as_deref())?,
        images: decode_column(fields.images.as_deref())?,
        reviews: decode_column(fields.reviews.as_deref())?,
    })
}

/// Build the row payload; nested values are stored as JSON strings
fn new_product_fields(product: &NewProduct) -> Result<ProductFields> {
    let draft = &product.draft;

    Ok(ProductFields {
        title: draft.title.clone(),
        description: draft.description.clone(),
        thumbnail: product.thumbnail.clone(),
        price: draft.price,
        category: draft.category.clone(),
        rating: draft.rating,
        stock: draft.stock,
        brand: draft.brand.clone(),
        sku: draft.sku.clone(),
        weight: draft.weight,
        warranty_information: draft.warranty_information.clone(),
        shipping_information: draft.shipping_information.clone(),
        availability_status: draft.availability_status.clone(),
        return_policy: draft.return_policy.clone(),
        minimum_order_quantity: draft.minimum_order_quantity,
        dimensions: Some(serde_json::to_string(&draft.dimensions)?),
        reviews: Some("[]".to_string()),
        meta: Some(serde_json::to_string(&product.meta)?),
        images: Some(serde_json::to_string(&product.images)?),
    })
}

/// Which ledger record a [`AirtableLedger`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Favorite,
    Deleted,
}

/// One ledger row holding a comma-joined id list
pub struct AirtableLedger {
    client: AirtableClient,
    record_id: String,
    kind: LedgerKind,
}

impl AirtableLedger {
    pub fn new(client: AirtableClient, record_id: impl Into<String>, kind: LedgerKind) -> Self {
        Self {
            client,
            record_id: record_id.into(),
            kind,
        }
    }
}

#[async_trait]
impl LedgerSource for AirtableLedger {
    async fn read(&self) -> Result<IdSet> {
        let raw = match self.kind {
            LedgerKind::Favorite => {
                self.client
                    .get_record::<FavoriteFields>(&self.record_id)
                    .await
                    .map_err(api_error)?
                    .fields
                    .favorite
            }
            LedgerKind::Deleted => {
                self.client
                    .get_record::<DeletedFields>(&self.record_id)
                    .await
                    .map_err(api_error)?
                    .fields
                    .deleted
            }
        };

        Ok(parse_id_list(raw.as_deref()))
    }

    async fn write(&self, ids: &IdSet) -> Result<IdSet> {
        // Whole-value overwrite: whoever writes last wins
        let joined = Some(join_id_list(ids));

        let echoed = match self.kind {
            LedgerKind::Favorite => {
                let fields = FavoriteFields { favorite: joined };
                self.client
                    .update_record::<_, FavoriteFields>(&self.record_id, &fields)
                    .await
                    .map_err(api_error)?
                    .fields
                    .favorite
            }
            LedgerKind::Deleted => {
                let fields = DeletedFields { deleted: joined };
                self.client
                    .update_record::<_, DeletedFields>(&self.record_id, &fields)
                    .await
                    .map_err(api_error)?
                    .fields
                    .deleted
            }
        };

        Ok(parse_id_list(echoed.as_deref()))
    }
}
