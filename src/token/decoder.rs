//! Token Decoder
//!
//! Fallible extraction of claims from an opaque token string.

use std::sync::Mutex;

use crate::error::{DecodeError, SessionError, SessionResult};
use crate::types::Claims;

/// Token decoder interface (for dependency injection).
///
/// Decoding is a pure mapping from an opaque string to claims; failure is an
/// ordinary result the caller converts to "no claims", never a reason to
/// abort a validity check.
pub trait TokenDecoder: Send + Sync {
    /// Decode a token into claims.
    fn decode(&self, token: &str) -> SessionResult<Claims>;
}

/// JWT payload decoder.
///
/// Extracts the payload of a compact JWS without verifying the signature and
/// without enforcing `exp`: this layer surfaces claims, it does not
/// authenticate tokens. Trust decisions belong to whoever issued and verified
/// the token server-side.
#[cfg(feature = "jwt")]
pub struct JwtTokenDecoder {
    validation: jsonwebtoken::Validation,
}

#[cfg(feature = "jwt")]
impl JwtTokenDecoder {
    /// Create a new JWT decoder.
    pub fn new() -> Self {
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self { validation }
    }
}

#[cfg(feature = "jwt")]
impl Default for JwtTokenDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "jwt")]
impl TokenDecoder for JwtTokenDecoder {
    fn decode(&self, token: &str) -> SessionResult<Claims> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(&[]),
            &self.validation,
        )
        .map_err(map_jwt_error)?;

        Ok(data.claims)
    }
}

#[cfg(feature = "jwt")]
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> SessionError {
    use jsonwebtoken::errors::ErrorKind;

    let decode_error = match error.kind() {
        ErrorKind::Json(source) => DecodeError::InvalidPayload {
            message: source.to_string(),
        },
        _ => DecodeError::MalformedToken {
            message: error.to_string(),
        },
    };

    SessionError::Decode(decode_error)
}

/// Mock token decoder for testing.
#[derive(Default)]
pub struct MockTokenDecoder {
    decode_history: Mutex<Vec<String>>,
    next_claims: Mutex<Option<Claims>>,
    next_error: Mutex<Option<SessionError>>,
}

impl MockTokenDecoder {
    /// Create new mock decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next claims to return.
    pub fn set_next_claims(&self, claims: Claims) -> &Self {
        *self.next_claims.lock().unwrap() = Some(claims);
        self
    }

    /// Set the next error to return.
    pub fn set_next_error(&self, error: SessionError) -> &Self {
        *self.next_error.lock().unwrap() = Some(error);
        self
    }

    /// Get decode history.
    pub fn get_decode_history(&self) -> Vec<String> {
        self.decode_history.lock().unwrap().clone()
    }
}

impl TokenDecoder for MockTokenDecoder {
    fn decode(&self, token: &str) -> SessionResult<Claims> {
        self.decode_history.lock().unwrap().push(token.to_string());

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        if let Some(claims) = self.next_claims.lock().unwrap().take() {
            return Ok(claims);
        }

        Ok(Claims {
            sub: Some("mock-subject".to_string()),
            ..Claims::default()
        })
    }
}

/// Create mock token decoder for testing.
pub fn create_mock_token_decoder() -> MockTokenDecoder {
    MockTokenDecoder::new()
}
