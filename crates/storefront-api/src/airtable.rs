use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::http::{build_client, describe_failure};

const AIRTABLE_API_BASE: &str = "https://api.airtable.com/v0";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum AirtableError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirtableError>;

/// Client scoped to a single Airtable table.
///
/// The product table, the favorite ledger and the deleted ledger each get
/// their own instance; they only differ in the table segment of the URL.
pub struct AirtableClient {
    client: reqwest::Client,
    table_url: String,
    token: Option<String>,
}

impl AirtableClient {
    pub fn new(base_id: &str, table: &str, token: Option<String>) -> Result<Self> {
        Self::with_base_url(AIRTABLE_API_BASE, base_id, table, token, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_base_url(
        api_url: &str,
        base_id: &str,
        table: &str,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let table_url = format!(
            "{}/{}/{}",
            api_url.trim_end_matches('/'),
            urlencoding::encode(base_id),
            urlencoding::encode(table)
        );

        Ok(Self {
            client: build_client(timeout_secs)?,
            table_url,
            token,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map the status codes Airtable uses into our error type
    async fn check(&self, response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = response.status();

        if status == 404 {
            return Err(AirtableError::NotFound(what.to_string()));
        }

        if status == 401 || status == 403 {
            return Err(AirtableError::AuthRequired);
        }

        if status == 429 {
            return Err(AirtableError::RateLimitExceeded);
        }

        if !status.is_success() {
            return Err(AirtableError::RequestFailed(describe_failure(response).await));
        }

        Ok(response)
    }

    /// List every record in the table.
    ///
    /// Airtable pages at 100 records and hands back an `offset` token while
    /// more remain; we keep following it until it disappears.
    pub async fn list_records<F: DeserializeOwned>(&self) -> Result<Vec<AirtableRecord<F>>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.authorize(self.client.get(&self.table_url));
            if let Some(ref token) = offset {
                request = request.query(&[("offset", token.as_str())]);
            }

            debug!("GET {} (offset: {:?})", self.table_url, offset);
            let response = self.check(request.send().await?, &self.table_url).await?;
            let page: AirtableList<F> = response.json().await?;

            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!("Airtable returned {} records", records.len());
        Ok(records)
    }

    pub async fn get_record<F: DeserializeOwned>(&self, record_id: &str) -> Result<AirtableRecord<F>> {
        let url = format!("{}/{}", self.table_url, urlencoding::encode(record_id));
        debug!("GET {}", url);

        let request = self.authorize(self.client.get(&url));
        let response = self.check(request.send().await?, record_id).await?;

        let record: AirtableRecord<F> = response.json().await?;
        Ok(record)
    }

    /// Append a record; Airtable echoes it back with its assigned id
    pub async fn create_record<F, R>(&self, fields: &F) -> Result<AirtableRecord<R>>
    where
        F: Serialize,
        R: DeserializeOwned,
    {
        debug!("POST {}", self.table_url);

        let request = self
            .authorize(self.client.post(&self.table_url))
            .json(&FieldsBody { fields });
        let response = self.check(request.send().await?, &self.table_url).await?;

        let record: AirtableRecord<R> = response.json().await?;
        Ok(record)
    }

    /// Patch the given fields of one record, leaving the others alone
    pub async fn update_record<F, R>(&self, record_id: &str, fields: &F) -> Result<AirtableRecord<R>>
    where
        F: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.table_url, urlencoding::encode(record_id));
        debug!("PATCH {}", url);

        let request = self
            .authorize(self.client.patch(&url))
            .json(&FieldsBody { fields });
        let response = self.check(request.send().await?, record_id).await?;

        let record: AirtableRecord<R> = response.json().await?;
        Ok(record)
    }
}

#[derive(Serialize)]
struct FieldsBody<'a, F: Serialize> {
    fields: &'a F,
}

/// One page of a table listing
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableList<F> {
    pub records: Vec<AirtableRecord<F>>,
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableRecord<F> {
    pub id: String,
    pub fields: F,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

/// Row of the product table.
///
/// `dimensions`, `reviews`, `meta` and `images` are stored as JSON-encoded
/// strings; decoding them is up to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
}

/// Favorite ledger row - a comma-joined id list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<String>,
}

/// Deleted ledger row - same layout, different field name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,
}
