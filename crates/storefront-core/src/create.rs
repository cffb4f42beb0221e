// Product creation: form normalization and upload validation
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ApiType, Dimensions, Meta, ProductId};
use crate::status::RequestStatus;
use crate::{Error, Result};

pub const ALLOWED_FILE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// 5 MiB
pub const MAX_FILE_SIZE: usize = 5_242_880;

/// Stand-in QR code until the backend generates real ones
pub const PLACEHOLDER_QR_CODE: &str = "https://assets.dummyjson.com/public/qr-code.png";

/// A select-box choice; only the label is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An image picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_from_extension(path).to_string();

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    /// Only web image formats up to 5 MiB are accepted
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_FILE_TYPES.contains(&self.mime_type.as_str()) {
            return Err(Error::InvalidUpload {
                name: self.name.clone(),
                reason: format!("unsupported type {}", self.mime_type),
            });
        }

        if self.bytes.len() > MAX_FILE_SIZE {
            return Err(Error::InvalidUpload {
                name: self.name.clone(),
                reason: format!("{} bytes exceeds the 5 MB limit", self.bytes.len()),
            });
        }

        Ok(())
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Raw input of the create screen. Numbers arrive as text, the way form
/// inputs hand them over.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: SelectOption,
    pub rating: String,
    pub stock: String,
    pub brand: String,
    pub sku: String,
    pub weight: String,
    pub warranty_information: SelectOption,
    pub shipping_information: SelectOption,
    pub availability_status: SelectOption,
    pub return_policy: SelectOption,
    pub minimum_order_quantity: String,
    pub width: String,
    pub height: String,
    pub depth: String,
    /// 12-digit UPC
    pub barcode: String,
    pub thumbnail: Vec<UploadFile>,
    pub images: Vec<UploadFile>,
}

/// Form with every field coerced, waiting for its image URLs
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub rating: Option<f64>,
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
    pub barcode: String,
}

/// Fully resolved product, ready to be written to the product table
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub draft: ProductDraft,
    pub thumbnail: String,
    pub images: Vec<String>,
    pub meta: Meta,
}

/// What a successful create hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub id: ProductId,
    pub api_type: ApiType,
}

#[derive(Debug, Clone, Default)]
pub struct CreateState {
    pub status: RequestStatus,
    pub created: Option<CreatedProduct>,
}

impl ProductForm {
    /// Coerce the numeric fields and collapse select options to labels
    pub fn normalize(&self) -> Result<ProductDraft> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::field("title", "must not be empty"));
        }

        let price: Decimal = parse_number("price", &self.price)?;
        if price.is_sign_negative() {
            return Err(Error::field("price", "must not be negative"));
        }

        let rating = if self.rating.trim().is_empty() {
            None
        } else {
            let rating: f64 = parse_number("rating", &self.rating)?;
            if !(0.0..=5.0).contains(&rating) {
                return Err(Error::field("rating", "must be between 0 and 5"));
            }
            Some(rating)
        };

        let minimum_order_quantity: u32 =
            parse_number("minimumOrderQuantity", &self.minimum_order_quantity)?;
        if minimum_order_quantity < 1 {
            return Err(Error::field("minimumOrderQuantity", "must be at least 1"));
        }

        let barcode = self.barcode.trim();
        if barcode.len() != 12 || !barcode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::field("barcode", "expected a 12-digit UPC"));
        }

        Ok(ProductDraft {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            price,
            category: self.category.label.clone(),
            rating,
            stock: parse_number("stock", &self.stock)?,
            brand: self.brand.trim().to_string(),
            sku: self.sku.trim().to_string(),
            weight: parse_non_negative("weight", &self.weight)?,
            warranty_information: self.warranty_information.label.clone(),
            shipping_information: self.shipping_information.label.clone(),
            availability_status: self.availability_status.label.clone(),
            return_policy: self.return_policy.label.clone(),
            minimum_order_quantity,
            dimensions: Dimensions {
                width: parse_non_negative("width", &self.width)?,
                height: parse_non_negative("height", &self.height)?,
                depth: parse_non_negative("depth", &self.depth)?,
            },
            barcode: barcode.to_string(),
        })
    }
}

impl ProductDraft {
    /// Attach uploaded URLs and stamp creation time
    pub fn finish(self, thumbnail: String, images: Vec<String>, now: DateTime<Utc>) -> NewProduct {
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let meta = Meta {
            created_at: timestamp.clone(),
            updated_at: timestamp,
            barcode: self.barcode.clone(),
            qr_code: PLACEHOLDER_QR_CODE.to_string(),
        };

        NewProduct {
            draft: self,
            thumbnail,
            images,
            meta,
        }
    }
}

fn parse_number<T>(field: &'static str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| Error::field(field, format!("{:?} is not a number ({})", raw, e)))
}

fn parse_non_negative(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = parse_number(field, raw)?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::field(field, "must be a non-negative number"));
    }
    Ok(value)
}
