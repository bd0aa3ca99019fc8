//! # dochub-core
//!
//! Core crate for DocHub. Contains the collaborator traits consumed by the
//! history workflow (storage, signing, diff fetching), configuration
//! schemas, and the unified error system.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
