//! Version history entities.

pub mod change;
pub mod entry;
pub mod set;

pub use change::Change;
pub use entry::{History, HistoryRefresh};
pub use set::{HistoryPrevious, HistorySet};
