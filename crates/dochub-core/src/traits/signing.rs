//! Token signing trait.

use crate::result::AppResult;

/// Produces a signed token over a structured payload using a shared secret.
pub trait TokenSigner: Send + Sync + std::fmt::Debug + 'static {
    /// Sign `payload`. Failures map to [`crate::error::ErrorKind::Signing`].
    fn sign(&self, payload: &serde_json::Value) -> AppResult<String>;
}
