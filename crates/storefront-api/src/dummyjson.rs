use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::http::{build_client, describe_failure};

const DUMMYJSON_API_BASE: &str = "https://dummyjson.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum DummyJsonError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DummyJsonError>;

/// Read-only client for the public DummyJSON product catalog
pub struct DummyJsonClient {
    client: reqwest::Client,
    base_url: String,
}

impl DummyJsonClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DUMMYJSON_API_BASE.to_string(), DEFAULT_TIMEOUT_SECS)
    }

    /// Point the client at another host (mirrors, tests)
    pub fn with_base_url(base_url: String, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the whole catalog in one go.
    ///
    /// `limit=0` tells DummyJSON to skip its server-side paging.
    pub async fn list_products(&self) -> Result<Vec<DummyProduct>> {
        let url = format!("{}/products", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).query(&[("limit", "0")]).send().await?;

        if response.status() == 429 {
            return Err(DummyJsonError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(DummyJsonError::RequestFailed(describe_failure(response).await));
        }

        let page: ProductsPage = response.json().await?;
        debug!("DummyJSON returned {} of {} products", page.products.len(), page.total);
        Ok(page.products)
    }

    /// Get a single product with all of its detail fields
    pub async fn get_product(&self, id: u64) -> Result<DummyProduct> {
        let url = format!("{}/products/{}", self.base_url, id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == 404 {
            return Err(DummyJsonError::NotFound(id.to_string()));
        }

        if response.status() == 429 {
            return Err(DummyJsonError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(DummyJsonError::RequestFailed(describe_failure(response).await));
        }

        let product: DummyProduct = response.json().await?;
        Ok(product)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProductsPage {
    products: Vec<DummyProduct>,
    #[serde(default)]
    total: u64,
}

/// Product as DummyJSON serves it. The list endpoint returns the same shape
/// as the detail endpoint, so one type covers both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DummyProduct {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub rating: f64,
    pub stock: u32,
    pub brand: Option<String>,
    pub sku: String,
    pub weight: f64,
    pub dimensions: DummyDimensions,
    pub warranty_information: String,
    pub shipping_information: String,
    pub availability_status: String,
    pub reviews: Vec<DummyReview>,
    pub return_policy: String,
    pub minimum_order_quantity: u32,
    pub meta: DummyMeta,
    pub images: Vec<String>,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DummyDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DummyReview {
    pub rating: u8,
    pub comment: String,
    pub date: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DummyMeta {
    pub created_at: String,
    pub updated_at: String,
    pub barcode: String,
    pub qr_code: String,
}
