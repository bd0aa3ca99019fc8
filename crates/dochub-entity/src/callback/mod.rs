//! Editing server callback entities.

pub mod model;
pub mod status;

pub use model::{Callback, CallbackAction, CallbackHistory};
pub use status::CallbackStatus;
