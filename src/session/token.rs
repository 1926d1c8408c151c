use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::error::{Error, Result};

/// An opaque bearer credential issued by the authentication endpoint.
///
/// The token is forwarded verbatim. Nothing here checks its signature or
/// expiry; [`SessionToken::claims`] only decodes the payload so the caller can
/// make routing decisions on the role.
#[derive(Clone, Eq, PartialEq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps `token`, returning `None` for an empty string.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            return None;
        }
        Some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Splits the token into its header, payload and signature segments.
    pub fn segments(&self) -> Result<[&str; 3]> {
        let mut parts = self.0.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None)
                if !header.is_empty() && !payload.is_empty() =>
            {
                Ok([header, payload, signature])
            }
            _ => Err(Error::MalformedToken(
                "expected three dot-separated segments".to_string(),
            )),
        }
    }

    /// Decodes the payload segment.
    pub fn claims(&self) -> Result<TokenClaims> {
        let [_, payload, _] = self.segments()?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| Error::MalformedToken(format!("invalid payload encoding: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::MalformedToken(format!("invalid payload: {e}")))
    }
}

// The credential itself never ends up in logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Role claim carried by the token payload.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, Hash, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
    Other(String),
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ADMIN" => Self::Admin,
            "USER" => Self::User,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => "ADMIN".to_string(),
            Role::User => "USER".to_string(),
            Role::Other(other) => other,
        }
    }
}

/// The decoded payload of a [`SessionToken`].
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    pub role: Role,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The `exp` claim as a timestamp.
    ///
    /// Informational only: expiry is enforced by the remote API answering 401.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.exp
            .and_then(|exp| OffsetDateTime::from_unix_timestamp(exp).ok())
    }

    pub fn issued_at(&self) -> Option<OffsetDateTime> {
        self.iat
            .and_then(|iat| OffsetDateTime::from_unix_timestamp(iat).ok())
    }
}
