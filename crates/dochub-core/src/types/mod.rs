//! Shared value helpers.

pub mod filename;

pub use filename::{file_ext, file_stem, validate_filename};
