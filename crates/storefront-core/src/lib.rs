// Core business logic lives here - merging, overlays and the derived views
pub mod config;
pub mod create;
pub mod detail;
pub mod error;
pub mod format;
pub mod ledger;
pub mod listing;
pub mod models;
pub mod options;
pub mod providers;
pub mod sources;
pub mod status;
pub mod store;

pub use config::Config;
pub use create::{CreatedProduct, ProductForm, SelectOption, UploadFile};
pub use error::{Error, FailureReason};
pub use ledger::IdSet;
pub use listing::{Filters, ListingState, PriceSort, PAGE_SIZE};
pub use models::{ApiType, Product, ProductCard, ProductId};
pub use status::RequestStatus;
pub use store::{ProductStore, Sources, StoreSnapshot};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
