// The aggregate product store - owns the listing, detail and create state
// and drives every remote call through the source traits.
//
// The state lock is only ever taken between awaits, never across one, so a
// slow favorite write does not hold up a delete or a detail fetch.
use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::{
    create::{CreateState, CreatedProduct, ProductForm, UploadFile},
    detail::{DetailKey, DetailState},
    error::FailureReason,
    ledger::{toggled, with_added},
    listing::{ListingState, PriceSort},
    models::{ApiType, Product, ProductCard, ProductId},
    sources::{AssetUploader, CatalogSource, LedgerSource, ProductWriter},
    status::RequestStatus,
    Error,
};

/// Everything the store talks to
#[derive(Clone)]
pub struct Sources {
    pub dummyjson: Arc<dyn CatalogSource>,
    pub airtable: Arc<dyn CatalogSource>,
    pub product_writer: Arc<dyn ProductWriter>,
    pub favorites: Arc<dyn LedgerSource>,
    pub deleted: Arc<dyn LedgerSource>,
    pub uploader: Arc<dyn AssetUploader>,
}

/// Point-in-time copy of the store state, handed to renderers
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub listing: ListingState,
    pub details: DetailState,
    pub create: CreateState,
}

pub struct ProductStore {
    sources: Sources,
    state: RwLock<StoreSnapshot>,
    gates: LoadGates,
}

/// One load at a time per resource. A second caller waits for the first
/// load to settle instead of seeing a half-filled state.
#[derive(Default)]
struct LoadGates {
    catalog: Mutex<()>,
    favorites: Mutex<()>,
    deleted: Mutex<()>,
}

impl ProductStore {
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            state: RwLock::new(StoreSnapshot::default()),
            gates: LoadGates::default(),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.read().await.clone()
    }

    fn catalog_for(&self, api_type: ApiType) -> &Arc<dyn CatalogSource> {
        match api_type {
            ApiType::DummyJson => &self.sources.dummyjson,
            ApiType::Airtable => &self.sources.airtable,
        }
    }

    // ---- listing ----

    /// Fetch both catalogs concurrently and merge them, A before B.
    /// Either side failing fails the whole load.
    pub async fn load_catalog(&self) -> Result<usize, FailureReason> {
        let _gate = self.gates.catalog.lock().await;
        self.fetch_catalog().await
    }

    async fn fetch_catalog(&self) -> Result<usize, FailureReason> {
        self.state.write().await.listing.catalog_status = RequestStatus::Loading;
        debug!("Loading both catalogs");

        let fetched = tokio::try_join!(
            self.sources.dummyjson.list_products(),
            self.sources.airtable.list_products()
        );

        let outcome = fetched
            .map(|(dummy, airtable)| {
                let mut merged = tag_origin(dummy, ApiType::DummyJson);
                merged.extend(tag_origin(airtable, ApiType::Airtable));
                merged
            })
            .map_err(|e| {
                warn!("Catalog load failed: {}", e);
                FailureReason::FetchFailed
            });

        let mut state = self.state.write().await;
        state.listing.catalog_status = RequestStatus::from_outcome(&outcome);
        let merged = outcome?;
        let count = merged.len();
        info!("Loaded {} products", count);
        state.listing.set_catalog(merged);
        Ok(count)
    }

    /// Load the catalog unless it was already requested. A load already
    /// in flight is awaited, not skipped.
    pub async fn ensure_catalog(&self) -> Result<(), FailureReason> {
        let _gate = self.gates.catalog.lock().await;
        let status = self.state.read().await.listing.catalog_status;
        settle(status, self.fetch_catalog()).await
    }

    pub async fn load_favorites(&self) -> Result<usize, FailureReason> {
        let _gate = self.gates.favorites.lock().await;
        self.fetch_favorites().await
    }

    async fn fetch_favorites(&self) -> Result<usize, FailureReason> {
        self.state.write().await.listing.favorite_list_status = RequestStatus::Loading;

        let outcome = self.sources.favorites.read().await.map_err(|e| {
            warn!("Favorite ledger read failed: {}", e);
            FailureReason::FetchFailed
        });

        let mut state = self.state.write().await;
        state.listing.favorite_list_status = RequestStatus::from_outcome(&outcome);
        let favorites = outcome?;
        let count = favorites.len();
        state.listing.set_favorites(favorites);
        Ok(count)
    }

    pub async fn load_deleted(&self) -> Result<usize, FailureReason> {
        let _gate = self.gates.deleted.lock().await;
        self.fetch_deleted().await
    }

    async fn fetch_deleted(&self) -> Result<usize, FailureReason> {
        self.state.write().await.listing.deleted_list_status = RequestStatus::Loading;

        let outcome = self.sources.deleted.read().await.map_err(|e| {
            warn!("Deleted ledger read failed: {}", e);
            FailureReason::FetchFailed
        });

        let mut state = self.state.write().await;
        state.listing.deleted_list_status = RequestStatus::from_outcome(&outcome);
        let deleted = outcome?;
        let count = deleted.len();
        state.listing.set_deleted(deleted);
        Ok(count)
    }

    async fn ensure_favorites(&self) -> Result<(), FailureReason> {
        let _gate = self.gates.favorites.lock().await;
        let status = self.state.read().await.listing.favorite_list_status;
        settle(status, self.fetch_favorites()).await
    }

    async fn ensure_deleted(&self) -> Result<(), FailureReason> {
        let _gate = self.gates.deleted.lock().await;
        let status = self.state.read().await.listing.deleted_list_status;
        settle(status, self.fetch_deleted()).await
    }

    /// What the list screen does on entry: both ledgers concurrently, then
    /// the catalog once both are in. The catalog is never requested while a
    /// ledger is missing.
    pub async fn open_listing(&self) -> Result<(), FailureReason> {
        let (favorites, deleted) = tokio::join!(self.ensure_favorites(), self.ensure_deleted());
        favorites?;
        deleted?;
        self.ensure_catalog().await
    }

    /// Flip one id in the favorite ledger. Returns whether it is now a favorite.
    ///
    /// The ledger is read first if it never was: the write replaces the
    /// whole record, so it must start from what the backend holds.
    pub async fn toggle_favorite(&self, id: &ProductId) -> Result<bool, FailureReason> {
        self.state
            .write()
            .await
            .listing
            .favorite_update_status
            .insert(id.clone(), RequestStatus::Loading);

        if let Err(reason) = self.ensure_favorites().await {
            warn!("Not touching favorites for {}: ledger unavailable", id);
            self.state
                .write()
                .await
                .listing
                .favorite_update_status
                .insert(id.clone(), RequestStatus::Error(reason));
            return Err(reason);
        }

        let next = toggled(&self.state.read().await.listing.favorites, id);

        let outcome = self.sources.favorites.write(&next).await.map_err(|e| {
            warn!("Favorite update for {} failed: {}", id, e);
            FailureReason::WriteFailed
        });

        let mut state = self.state.write().await;
        state
            .listing
            .favorite_update_status
            .insert(id.clone(), RequestStatus::from_outcome(&outcome));
        let echoed = outcome?;
        let is_favorite = echoed.contains(id);
        state.listing.set_favorites(echoed);
        Ok(is_favorite)
    }

    /// Soft-delete: add the id to the deleted ledger. The product disappears
    /// from the listing as soon as the backend echoes the new set.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), FailureReason> {
        self.state
            .write()
            .await
            .listing
            .delete_status
            .insert(id.clone(), RequestStatus::Loading);

        if let Err(reason) = self.ensure_deleted().await {
            warn!("Not deleting {}: deleted ledger unavailable", id);
            self.state
                .write()
                .await
                .listing
                .delete_status
                .insert(id.clone(), RequestStatus::Error(reason));
            return Err(reason);
        }

        let next = with_added(&self.state.read().await.listing.deleted, id);

        let outcome = self.sources.deleted.write(&next).await.map_err(|e| {
            warn!("Delete of {} failed: {}", id, e);
            FailureReason::WriteFailed
        });

        let mut state = self.state.write().await;
        state
            .listing
            .delete_status
            .insert(id.clone(), RequestStatus::from_outcome(&outcome));
        let echoed = outcome?;
        let listing = &mut state.listing;
        listing.set_deleted(echoed);
        let raw = std::mem::take(&mut listing.raw_catalog);
        listing.set_catalog(raw);
        info!("Deleted product {}", id);
        Ok(())
    }

    pub async fn set_page(&self, page: usize) {
        self.state.write().await.listing.set_page(page);
    }

    pub async fn set_favorite_only(&self, favorite_only: bool) {
        self.state.write().await.listing.set_favorite_only(favorite_only);
    }

    pub async fn set_price_sort(&self, price_sort: PriceSort) {
        self.state.write().await.listing.set_price_sort(price_sort);
    }

    pub async fn cycle_price_sort(&self) -> PriceSort {
        self.state.write().await.listing.cycle_price_sort()
    }

    /// Next `ensure_catalog` will refetch
    pub async fn invalidate_catalog(&self) {
        self.state.write().await.listing.invalidate_catalog();
    }

    // ---- detail ----

    /// Fetch one product from the source its tag names. An unknown tag is
    /// recorded as INVALID_ROUTE without touching the network.
    pub async fn fetch_detail(&self, id: &ProductId, api_tag: &str) -> Result<Product, FailureReason> {
        let key = DetailKey::new(id.clone(), api_tag);

        let Some(api_type) = key.route() else {
            warn!("{}", Error::InvalidRoute(api_tag.to_string()));
            let reason = FailureReason::InvalidRoute;
            self.state
                .write()
                .await
                .details
                .finish(key, RequestStatus::Error(reason), None);
            return Err(reason);
        };

        self.state.write().await.details.start(key.clone());

        let outcome = self
            .catalog_for(api_type)
            .get_product(id)
            .await
            .map_err(|e| {
                warn!("Fetching {} from {} failed: {}", id, api_type, e);
                FailureReason::FetchFailed
            });

        let status = RequestStatus::from_outcome(&outcome);
        let product = outcome.as_ref().ok().cloned();
        self.state.write().await.details.finish(key, status, product);
        outcome
    }

    /// Cached detail when the last fetch for this key succeeded, else fetch
    pub async fn ensure_detail(&self, id: &ProductId, api_tag: &str) -> Result<Product, FailureReason> {
        let key = DetailKey::new(id.clone(), api_tag);
        if let Some(product) = self.state.read().await.details.cached(&key) {
            return Ok(product.clone());
        }
        self.fetch_detail(id, api_tag).await
    }

    // ---- create ----

    /// Upload the media, then write the row. Nothing is written to the
    /// product table unless every upload succeeded.
    pub async fn create_product(&self, form: &ProductForm) -> Result<CreatedProduct, FailureReason> {
        {
            let mut state = self.state.write().await;
            state.create.status = RequestStatus::Loading;
            state.create.created = None;
        }

        let outcome = self.run_create(form).await;

        let mut state = self.state.write().await;
        state.create.status = RequestStatus::from_outcome(&outcome);
        state.create.created = outcome.as_ref().ok().cloned();
        if outcome.is_ok() {
            // The new row belongs in the next listing
            state.listing.invalidate_catalog();
        }
        outcome
    }

    pub async fn reset_create(&self) {
        self.state.write().await.create = CreateState::default();
    }

    async fn run_create(&self, form: &ProductForm) -> Result<CreatedProduct, FailureReason> {
        let draft = form.normalize().map_err(|e| {
            warn!("Rejected product form: {}", e);
            FailureReason::WriteFailed
        })?;

        let thumbnail = self.upload_thumbnail(&form.thumbnail).await?;
        let images = self.upload_images(&form.images).await?;
        debug!("Uploaded thumbnail and {} images", images.len());

        let product = draft.finish(thumbnail, images, Utc::now());
        let id = self
            .sources
            .product_writer
            .create_product(&product)
            .await
            .map_err(|e| {
                warn!("Product write failed: {}", e);
                FailureReason::WriteFailed
            })?;

        info!("Created product {}", id);
        Ok(CreatedProduct {
            id,
            api_type: ApiType::Airtable,
        })
    }

    async fn upload_thumbnail(&self, files: &[UploadFile]) -> Result<String, FailureReason> {
        let fail = |e: Error| {
            warn!("Thumbnail upload failed: {}", e);
            FailureReason::UploadFailedThumbnail
        };

        let file = files.first().ok_or_else(|| {
            fail(Error::InvalidUpload {
                name: "thumbnail".into(),
                reason: "no file selected".into(),
            })
        })?;
        file.validate().map_err(fail)?;

        self.sources.uploader.upload(file).await.map_err(fail)
    }

    async fn upload_images(&self, files: &[UploadFile]) -> Result<Vec<String>, FailureReason> {
        let fail = |e: Error| {
            warn!("Image upload failed: {}", e);
            FailureReason::UploadFailedImages
        };

        for file in files {
            file.validate().map_err(fail)?;
        }

        try_join_all(files.iter().map(|file| self.sources.uploader.upload(file)))
            .await
            .map_err(fail)
    }
}

/// Shared tail of the `ensure_*` calls; runs `load` only from idle
async fn settle<T>(
    status: RequestStatus,
    load: impl std::future::Future<Output = Result<T, FailureReason>>,
) -> Result<(), FailureReason> {
    match status {
        RequestStatus::Idle => load.await.map(|_| ()),
        RequestStatus::Error(reason) => Err(reason),
        RequestStatus::Loading | RequestStatus::Success => Ok(()),
    }
}

fn tag_origin(products: Vec<ProductCard>, api_type: ApiType) -> Vec<ProductCard> {
    products
        .into_iter()
        .map(|product| ProductCard { api_type, ..product })
        .collect()
}
