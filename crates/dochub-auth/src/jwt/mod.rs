//! JWT signing and decoding.

pub mod decoder;
pub mod encoder;

pub use decoder::CallbackTokenDecoder;
pub use encoder::JwtSigner;
