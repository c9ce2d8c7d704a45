//! Claim Types
//!
//! Claims decoded from a bearer token payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Claims extracted from a bearer token.
///
/// Registered JWT claims get typed fields; everything else lands in `extra`.
/// The session core treats the whole structure as opaque: validity never
/// depends on any claim value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued-at time (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Issuer identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience; a string or an array of strings depending on the issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Value>,
    /// All other claims.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Claims {
    /// Get the subject claim, if present.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Look up a non-registered claim by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}
