//! Unverified JWT payload decoding
//!
//! The client never holds the signing key, so it only reads the payload
//! segment to learn the expiry and the user identity. Signature checks
//! belong to the backend.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::{FormField, Result, TinylinkError};
use crate::utils::lenient::{number_of, string_of};

/// Claims the client cares about; everything else in the payload is ignored
///
/// Any JSON payload decodes. Fields of an unexpected type read as absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch
    pub exp: Option<f64>,
    pub sub: Option<String>,
    /// First of `id`, `_id`, `userId` that holds a string or number
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl TokenClaims {
    pub fn from_payload(payload: &Value) -> Self {
        let field = |key: &str| payload.get(key).and_then(string_of);
        Self {
            exp: payload.get("exp").and_then(number_of),
            sub: field("sub"),
            id: ["id", "_id", "userId"].into_iter().find_map(|key| field(key)),
            email: field("email"),
            name: field("name"),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp?;
        if !exp.is_finite() {
            return None;
        }
        DateTime::from_timestamp(exp.trunc() as i64, 0)
    }

    /// 没有 exp 或 exp 早于 now 都视为过期
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at < now,
            None => true,
        }
    }
}

/// Decode the payload segment of a compact JWT
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let invalid =
        |why: &str| TinylinkError::validation(FormField::Token, format!("Invalid token: {}", why));

    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected three segments"));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| invalid(&e.to_string()))?;

    let payload: Value = serde_json::from_slice(&bytes).map_err(|e| invalid(&e.to_string()))?;
    Ok(TokenClaims::from_payload(&payload))
}
