//! Verification of tokens attached to editing server callbacks.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use dochub_core::config::DocumentServerConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_entity::callback::Callback;

/// Verifies callback tokens and replaces the body with the signed payload.
#[derive(Clone)]
pub struct CallbackTokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for CallbackTokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl CallbackTokenDecoder {
    /// Creates a decoder from a raw secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Editing servers do not always set `exp`; check it only when present.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(secret.trim().as_bytes()),
            validation,
        }
    }

    /// Creates a decoder when signing is enabled in configuration.
    pub fn from_config(config: &DocumentServerConfig) -> Option<Self> {
        config
            .signing_enabled()
            .then(|| Self::new(&config.jwt_secret))
    }

    /// Verifies the token from `header` (`Bearer <token>`) or, failing that,
    /// from the body's `token` field, and returns the callback it carries.
    pub fn decode_callback(&self, body: &Callback, header: Option<&str>) -> AppResult<Callback> {
        let token = match header.map(str::trim).filter(|h| !h.is_empty()) {
            Some(value) => value
                .strip_prefix("Bearer ")
                .map(str::trim)
                .ok_or_else(|| AppError::authentication("Malformed callback token header"))?,
            None => body
                .token
                .as_deref()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| AppError::authentication("jwt string is empty"))?,
        };

        let data =
            decode::<serde_json::Value>(token, &self.decoding_key, &self.validation).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Authentication,
                    "could not process JWT in callback body",
                    e,
                )
            })?;

        // Header tokens wrap the callback in a `payload` claim.
        let claims = match data.claims {
            serde_json::Value::Object(mut map) => match map.remove("payload") {
                Some(inner @ serde_json::Value::Object(_)) => inner,
                Some(other) => {
                    map.insert("payload".to_string(), other);
                    serde_json::Value::Object(map)
                }
                None => serde_json::Value::Object(map),
            },
            other => other,
        };

        let mut decoded: Callback = serde_json::from_value(claims).map_err(|e| {
            AppError::with_source(
                ErrorKind::Authentication,
                "could not populate callback body with decoded JWT",
                e,
            )
        })?;

        if decoded.filename.is_empty() {
            decoded.filename = body.filename.clone();
        }
        if decoded.user_address.is_empty() {
            decoded.user_address = body.user_address.clone();
        }

        debug!(key = %decoded.key, status = %decoded.status, "Verified callback token");
        Ok(decoded)
    }
}
