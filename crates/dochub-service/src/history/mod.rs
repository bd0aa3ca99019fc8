//! Version history: on-disk layout, builder, writer, and commit locks.

pub mod builder;
pub mod layout;
pub mod lock;
pub mod writer;

pub use builder::HistoryBuilder;
pub use lock::{CommitGuard, CommitLocks};
pub use writer::HistoryWriter;
