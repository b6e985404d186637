//! Role resolution from the session credential.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// The viewer's role. Used only to decide what the console shows; the backend
/// enforces authorization on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Local,
    Almacen,
    Admin,
    /// No credential, an undecodable one, or a role the console does not know.
    Unknown,
}

impl Role {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "local" => Role::Local,
            "almacen" => Role::Almacen,
            "admin" => Role::Admin,
            _ => Role::Unknown,
        }
    }

    pub fn tag(self) -> Option<&'static str> {
        match self {
            Role::Local => Some("local"),
            Role::Almacen => Some("almacen"),
            Role::Admin => Some("admin"),
            Role::Unknown => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("unknown"))
    }
}

/// The claims the console reads from a token payload. Every other claim is
/// ignored, whatever its type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    pub role: Option<String>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("credential is not a three-part token")]
    Malformed,

    #[error("payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not JSON claims: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes the payload segment of a JWT. The signature is not checked.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(DecodeError::Malformed),
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Resolves the role carried by `credential`.
///
/// Never fails: a missing or broken credential yields [`Role::Unknown`], and
/// decoding problems are only logged.
pub fn resolve_role(credential: Option<&str>) -> Role {
    let Some(token) = credential else {
        debug!("No credential stored");
        return Role::Unknown;
    };
    match decode_claims(token) {
        Ok(claims) => claims.role.as_deref().map_or(Role::Unknown, Role::from_tag),
        Err(e) => {
            warn!(error = %e, "Could not decode credential");
            Role::Unknown
        }
    }
}

#[cfg(test)]
pub(crate) fn token_with_payload(payload: &str) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_roles() {
        for (tag, role) in [("local", Role::Local), ("almacen", Role::Almacen), ("admin", Role::Admin)] {
            let token = token_with_payload(&format!(r#"{{"sub":"ana","role":"{tag}"}}"#));
            assert_eq!(resolve_role(Some(&token)), role);
        }
    }

    #[test]
    fn test_missing_or_unknown_role_is_unknown() {
        assert_eq!(resolve_role(None), Role::Unknown);
        assert_eq!(resolve_role(Some(&token_with_payload(r#"{"sub":"ana"}"#))), Role::Unknown);
        assert_eq!(
            resolve_role(Some(&token_with_payload(r#"{"role":"root"}"#))),
            Role::Unknown
        );
    }

    #[test]
    fn test_garbage_credentials_do_not_fail() {
        assert_eq!(resolve_role(Some("not-a-token")), Role::Unknown);
        assert_eq!(resolve_role(Some("a.!!!.c")), Role::Unknown);
        assert_eq!(resolve_role(Some(&token_with_payload("[1,2]"))), Role::Unknown);
        assert!(matches!(decode_claims("a.b"), Err(DecodeError::Malformed)));
    }

    #[test]
    fn test_other_claims_do_not_affect_the_role() {
        let numeric_sub = token_with_payload(r#"{"sub":42,"role":"admin"}"#);
        assert_eq!(resolve_role(Some(&numeric_sub)), Role::Admin);

        let fractional_exp = token_with_payload(r#"{"sub":"ana","role":"local","exp":1717171717.5}"#);
        assert_eq!(resolve_role(Some(&fractional_exp)), Role::Local);

        let nested = token_with_payload(r#"{"role":"almacen","scopes":["a","b"],"meta":{"x":null}}"#);
        assert_eq!(resolve_role(Some(&nested)), Role::Almacen);
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let token = format!(
            "h.{}.s",
            base64::engine::general_purpose::URL_SAFE.encode(r#"{"role":"admin"}"#)
        );
        assert_eq!(resolve_role(Some(&token)), Role::Admin);
    }
}
