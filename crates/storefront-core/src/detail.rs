// Per-product detail cache keyed by (id, source tag)
use std::collections::HashMap;

use crate::models::{ApiType, Product, ProductId};
use crate::status::RequestStatus;

/// The source tag is kept raw: a tag we cannot route still gets its own
/// entry so the view can show "not found" for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub id: ProductId,
    pub api_type: String,
}

impl DetailKey {
    pub fn new(id: ProductId, api_type: impl Into<String>) -> Self {
        Self {
            id,
            api_type: api_type.into(),
        }
    }

    pub fn route(&self) -> Option<ApiType> {
        ApiType::from_tag(&self.api_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailEntry {
    pub status: RequestStatus,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    entries: HashMap<DetailKey, DetailEntry>,
}

impl DetailState {
    pub fn status(&self, key: &DetailKey) -> RequestStatus {
        self.entries
            .get(key)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    /// Cached product, only when the last fetch for this key succeeded
    pub fn cached(&self, key: &DetailKey) -> Option<&Product> {
        self.entries
            .get(key)
            .filter(|entry| entry.status.is_success())
            .and_then(|entry| entry.product.as_ref())
    }

    pub(crate) fn start(&mut self, key: DetailKey) {
        self.entries.insert(
            key,
            DetailEntry {
                status: RequestStatus::Loading,
                product: None,
            },
        );
    }

    pub(crate) fn finish(&mut self, key: DetailKey, status: RequestStatus, product: Option<Product>) {
        self.entries.insert(key, DetailEntry { status, product });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
