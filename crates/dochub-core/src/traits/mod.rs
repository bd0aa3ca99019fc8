//! Collaborator traits defined in `dochub-core` and implemented by other crates.

pub mod fetch;
pub mod signing;
pub mod storage;

pub use fetch::RemoteFetcher;
pub use signing::TokenSigner;
pub use storage::{DocumentStorage, FileMeta};
