//! # dochub-auth
//!
//! Token handling shared with the editing server.
//!
//! ## Modules
//!
//! - `jwt` - HS256 signing of history sets and decoding of callback tokens

pub mod jwt;

pub use jwt::{CallbackTokenDecoder, JwtSigner};
