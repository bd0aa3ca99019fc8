//! Handling of editing server callbacks.

pub mod service;

pub use service::CallbackService;
