//! Bearer-token session state.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use crate::StorageKeys;
use crate::error::{Error, Result};
use crate::store::{MemoryStore, PersistentStore};

mod token;
pub use token::{Role, SessionToken, TokenClaims};

/// Body returned by the authentication endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

/// Reads, writes and clears the session token in a [`PersistentStore`].
///
/// The token is not cached: every read goes to the store, so the store stays
/// the single source of truth. Reads never fail; an unavailable backend reads
/// as "no token".
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use dairy_session::Session;
/// use dairy_session::store::MemoryStore;
/// use http::header::AUTHORIZATION;
///
/// let session = Session::new(Arc::new(MemoryStore::new()));
/// assert!(session.auth_headers().get(AUTHORIZATION).is_none());
///
/// session.set_token("abc").unwrap();
/// assert!(session.is_authenticated());
/// assert_eq!(session.auth_headers()[AUTHORIZATION], "Bearer abc");
/// ```
#[derive(Debug)]
pub struct Session<S: PersistentStore = MemoryStore> {
    store: Arc<S>,
    key: String,
}

impl<S> Session<S>
where
    S: PersistentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_keys(store, &StorageKeys::default())
    }

    pub fn with_keys(store: Arc<S>, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.token_key(),
        }
    }

    /// Returns `true` if a non-empty token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Returns the stored token, if any.
    pub fn token(&self) -> Option<SessionToken> {
        match self.store.get(&self.key) {
            Ok(Some(token)) => SessionToken::new(token),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(err = %err, "failed to read session token, treating as signed out");
                None
            }
        }
    }

    /// Decodes the claims of the stored token.
    ///
    /// Returns `Ok(None)` when signed out.
    pub fn claims(&self) -> Result<Option<TokenClaims>> {
        self.token().map(|token| token.claims()).transpose()
    }

    /// Stores `token`, overwriting any previous one.
    #[tracing::instrument(name = "storing session token", skip_all)]
    pub fn set_token(&self, token: impl AsRef<str>) -> Result<()> {
        self.store
            .set(&self.key, token.as_ref())
            .map_err(|err| {
                tracing::error!(err = %err, "failed to store session token");
                err.into()
            })
    }

    /// Deletes the stored token.
    #[tracing::instrument(name = "removing session token", skip(self))]
    pub fn remove_token(&self) -> Result<()> {
        self.store.remove(&self.key).map_err(|err| {
            tracing::error!(err = %err, "failed to remove session token");
            err.into()
        })
    }

    /// Headers for a JSON request to the remote API.
    ///
    /// `Authorization: Bearer <token>` is included only when a token is stored
    /// and forms a valid header value; otherwise the entry is omitted.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token.as_str())) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("session token is not a valid header value, omitting it");
                }
            }
        }

        headers
    }

    /// Completes a sign-in with the body returned by the authentication
    /// endpoint.
    ///
    /// The token is stored only if its payload decodes; the decoded claims are
    /// returned so the caller can route on [`TokenClaims::role`].
    #[tracing::instrument(name = "signing in", skip_all)]
    pub fn sign_in(&self, body: &str) -> Result<TokenClaims> {
        let response: AuthResponse = serde_json::from_str(body).map_err(|err| {
            tracing::error!(err = %err, "unreadable authentication response");
            Error::InvalidAuthResponse(err.to_string())
        })?;

        let token = SessionToken::new(response.access_token)
            .ok_or_else(|| Error::MalformedToken("empty access token".to_string()))?;
        let claims = token.claims().map_err(|err| {
            tracing::error!(err = %err, "failed to decode access token");
            err
        })?;

        self.set_token(token.as_str())?;
        tracing::debug!(sub = %claims.sub, role = ?claims.role, "signed in");

        Ok(claims)
    }

    /// Inspects the status of a remote API response.
    ///
    /// A `401 Unauthorized` clears the stored token and yields
    /// [`Error::Unauthorized`] so the caller can send the user back to sign-in.
    /// Every other status is left to the caller.
    #[tracing::instrument(name = "checking response status", skip(self))]
    pub fn check_status(&self, status: StatusCode) -> Result<()> {
        if status != StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        tracing::debug!("remote api rejected the session token, signing out");
        self.remove_token()?;
        Err(Error::Unauthorized)
    }
}
