//! HS256 token signing for payloads handed to the editing client.

use jsonwebtoken::{EncodingKey, Header, encode};

use dochub_core::config::DocumentServerConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::traits::TokenSigner;

/// Signs arbitrary JSON payloads with the shared editing-server secret.
#[derive(Clone)]
pub struct JwtSigner {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSigner").finish_non_exhaustive()
    }
}

impl JwtSigner {
    /// Creates a signer from a raw secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.trim().as_bytes()),
        }
    }

    /// Creates a signer when signing is enabled in configuration.
    pub fn from_config(config: &DocumentServerConfig) -> Option<Self> {
        config
            .signing_enabled()
            .then(|| Self::new(&config.jwt_secret))
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, payload: &serde_json::Value) -> AppResult<String> {
        if !payload.is_object() {
            return Err(AppError::signing("JWT payload must be a JSON object"));
        }
        encode(&Header::default(), payload, &self.encoding_key).map_err(|e| {
            AppError::with_source(
                ErrorKind::Signing,
                "jwt could not create a signed string with the given key",
                e,
            )
        })
    }
}
