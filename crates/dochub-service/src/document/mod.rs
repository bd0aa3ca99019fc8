//! Live documents and their history artifacts.

pub mod service;

pub use service::DocumentService;
