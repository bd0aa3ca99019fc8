//! # dochub-service
//!
//! The document versioning workflow. The history writer rolls a finished
//! edit session into an immutable version slot; the history builder walks
//! committed slots back into a signed, replayable history for the editor.
//!
//! Services follow constructor injection: storage, signing and fetching
//! collaborators are provided at construction time via `Arc` references.

pub mod callback;
pub mod document;
pub mod fetch;
pub mod history;

#[cfg(test)]
pub(crate) mod testing;

pub use callback::CallbackService;
pub use document::DocumentService;
pub use fetch::HttpRemoteFetcher;
pub use history::{CommitLocks, HistoryBuilder, HistoryWriter};
