// DummyJSON provider - the read-only demo catalog
use async_trait::async_trait;
use storefront_api::{DummyJsonClient, DummyJsonError, DummyProduct};

use crate::{
    models::{ApiType, Dimensions, Meta, Product, ProductCard, ProductId, Review},
    sources::CatalogSource,
    Error, Result,
};

/// Wrapper around DummyJsonClient that implements CatalogSource
pub struct DummyJsonCatalog {
    client: DummyJsonClient,
}

impl DummyJsonCatalog {
    pub fn new(client: DummyJsonClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for DummyJsonCatalog {
    async fn list_products(&self) -> Result<Vec<ProductCard>> {
        let products = self
            .client
            .list_products()
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(products.iter().map(dummy_to_card).collect())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product> {
        // DummyJSON only knows integer ids
        let numeric = id
            .as_numeric()
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let product = self.client.get_product(numeric).await.map_err(|e| match e {
            DummyJsonError::NotFound(id) => Error::NotFound(id),
            other => Error::ApiError(other.to_string()),
        })?;

        Ok(dummy_to_product(product))
    }
}

fn dummy_to_card(dj: &DummyProduct) -> ProductCard {
    ProductCard {
        id: ProductId::Numeric(dj.id),
        title: dj.title.clone(),
        description: dj.description.clone(),
        thumbnail: dj.thumbnail.clone(),
        price: dj.price,
        api_type: ApiType::DummyJson,
    }
}

/// Convert a DummyJSON product into our Product model
fn dummy_to_product(dj: DummyProduct) -> Product {
    Product {
        card: dummy_to_card(&dj),
        category: dj.category,
        rating: dj.rating,
        stock: dj.stock,
        brand: dj.brand.unwrap_or_default(), // a few DummyJSON groceries have no brand
        sku: dj.sku,
        weight: dj.weight,
        warranty_information: dj.warranty_information,
        shipping_information: dj.shipping_information,
        availability_status: dj.availability_status,
        return_policy: dj.return_policy,
        minimum_order_quantity: dj.minimum_order_quantity,
        dimensions: Dimensions {
            width: dj.dimensions.width,
            height: dj.dimensions.height,
            depth: dj.dimensions.depth,
        },
        meta: Meta {
            created_at: dj.meta.created_at,
            updated_at: dj.meta.updated_at,
            barcode: dj.meta.barcode,
            qr_code: dj.meta.qr_code,
        },
        images: dj.images,
        reviews: dj
            .reviews
            .into_iter()
            .map(|r| Review {
                rating: r.rating,
                comment: r.comment,
                date: r.date,
                reviewer_name: r.reviewer_name,
                reviewer_email: r.reviewer_email,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storefront_api::{DummyDimensions, DummyReview};

    #[test]
    fn test_conversion_tags_origin_and_keeps_details() {
        let dj = DummyProduct {
            id: 30,
            title: "Kiwi".into(),
            price: Decimal::new(249, 2),
            brand: None,
            dimensions: DummyDimensions {
                width: 1.0,
                height: 2.0,
                depth: 3.0,
            },
            reviews: vec![DummyReview {
                rating: 5,
                comment: "Fresh".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let product = dummy_to_product(dj);
        assert_eq!(product.card.id, ProductId::Numeric(30));
        assert_eq!(product.card.api_type, ApiType::DummyJson);
        assert_eq!(product.brand, "");
        assert_eq!(product.dimensions.depth, 3.0);
        assert_eq!(product.reviews[0].rating, 5);
    }
}
