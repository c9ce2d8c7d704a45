//! Token Handling
//!
//! Namespaced persistence for the opaque bearer token and claims extraction.

pub mod decoder;
pub mod persistence;

#[cfg(feature = "jwt")]
pub use decoder::JwtTokenDecoder;
pub use decoder::{create_mock_token_decoder, MockTokenDecoder, TokenDecoder};
pub use persistence::{TokenPersistence, AUTH_TOKEN_KEY_SUFFIX};
