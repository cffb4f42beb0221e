// Provider implementations - bridge the API clients to the source traits
pub mod airtable;
pub mod cloudinary;
pub mod dummyjson;

pub use airtable::{AirtableCatalog, AirtableLedger, LedgerKind};
pub use cloudinary::CloudinaryUploader;
pub use dummyjson::DummyJsonCatalog;
