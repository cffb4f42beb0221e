use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier across both catalogs.
///
/// DummyJSON hands out integers, Airtable opaque record ids. The derived
/// ordering puts every numeric id before every text id; numeric ids compare
/// by value and text ids lexicographically, so the merged list has one total
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Numeric(u64),
    Text(String),
}

impl ProductId {
    /// Parse an id as it appears in ledgers and URLs.
    ///
    /// All-digit tokens that fit a u64 are numeric; everything else is text.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<u64>() {
                return ProductId::Numeric(n);
            }
        }
        ProductId::Text(raw.to_string())
    }

    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            ProductId::Numeric(n) => Some(*n),
            ProductId::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Numeric(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProductId::parse(s))
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Numeric(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::parse(s)
    }
}

/// Which catalog a product came from - needed to route detail fetches back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiType {
    #[serde(rename = "dummyApi")]
    DummyJson,
    #[serde(rename = "airtable")]
    Airtable,
}

impl ApiType {
    pub fn tag(&self) -> &'static str {
        match self {
            ApiType::DummyJson => "dummyApi",
            ApiType::Airtable => "airtable",
        }
    }

    /// Resolve a route tag. Anything but the two known tags is unroutable.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dummyApi" => Some(ApiType::DummyJson),
            "airtable" => Some(ApiType::Airtable),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// List-level product header, the shape both catalogs are normalized into
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub price: Decimal,
    pub api_type: ApiType,
}

/// Full product as shown on the detail screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub card: ProductCard,
    pub category: String,
    pub rating: f64,
    pub stock: u32,
    pub brand: String,
    pub sku: String,
    pub weight: f64,
    pub warranty_information: String,
    pub shipping_information: String,
    pub availability_status: String,
    pub return_policy: String,
    pub minimum_order_quantity: u32,
    pub dimensions: Dimensions,
    pub meta: Meta,
    pub images: Vec<String>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub created_at: String,
    pub updated_at: String,
    pub barcode: String,
    pub qr_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    /// 1 to 5
    pub rating: u8,
    pub comment: String,
    /// ISO-8601 timestamp
    pub date: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
}
