//! # dochub-storage
//!
//! Storage implementations for DocHub. Documents live on the local
//! filesystem, one root folder per tenant address, with history sidecars
//! next to the live files.

pub mod mime;
pub mod providers;

pub use mime::mime_from_path;
pub use providers::LocalDocumentStorage;
