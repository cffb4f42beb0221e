// API client implementations for the remote catalog, ledger and asset services
pub mod airtable;
pub mod cloudinary;
pub mod dummyjson;
mod http;

// Re-export common types
pub use airtable::{
    AirtableClient, AirtableError, AirtableList, AirtableRecord, DeletedFields, FavoriteFields,
    ProductFields,
};
pub use cloudinary::{CloudinaryClient, CloudinaryError, UploadResponse};
pub use dummyjson::{
    DummyDimensions, DummyJsonClient, DummyJsonError, DummyMeta, DummyProduct, DummyReview,
};
pub use http::build_client;
