//! # dochub-entity
//!
//! Domain models for DocHub. Every struct here is a JSON value object
//! exchanged with the editing server or persisted in a document's history
//! sidecar. All models derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`.

pub mod callback;
pub mod history;
pub mod user;

pub use callback::{Callback, CallbackStatus};
pub use history::{Change, History, HistoryPrevious, HistoryRefresh, HistorySet};
pub use user::EditorUser;
