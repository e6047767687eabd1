//! Authentication — session state, per-request auth material, login wire types.
//!
//! ## Security Model
//!
//! - The session (user id, password, both bearer tokens, `session` cookie) lives
//!   only in memory inside the client. It is never written to disk.
//! - Secrets are held as [`SecretString`] so `Debug` output never leaks them.
//!   There is no public token accessor.
//! - The password is kept only for `POST /api/identity/reauthenticate`.
//! - **Logout** clears local state only; the backend is not contacted.
//!
//! ## Per-request auth
//!
//! Every request builds its own [`RequestAuth`] from the session at call time.
//! Nothing mutates shared headers, so concurrent page workers can read the
//! session without coordination.

pub mod client;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Which credential a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScope {
    /// No session required, nothing attached.
    Public,
    /// Primary (distill) bearer token + session cookie. Market data and account calls.
    Primary,
    /// Secondary (rakaia) bearer token + session cookie. Portfolio host.
    Portfolio,
}

/// Logged-in session state.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) user_id: String,
    pub(crate) password: SecretString,
    pub(crate) distill_token: SecretString,
    pub(crate) rakaia_token: SecretString,
    pub(crate) cookie: Option<SecretString>,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Build the auth material for one request.
    ///
    /// An empty token counts as absent.
    pub(crate) fn request_auth(&self, scope: AuthScope) -> Result<RequestAuth, AuthError> {
        let token = match scope {
            AuthScope::Public => return Ok(RequestAuth::default()),
            AuthScope::Primary => &self.distill_token,
            AuthScope::Portfolio => &self.rakaia_token,
        };
        if token.expose_secret().is_empty() || self.user_id.is_empty() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(RequestAuth {
            user_id: Some(self.user_id.clone()),
            bearer: Some(token.clone()),
            cookie: self.cookie.clone(),
        })
    }
}

/// Immutable auth material attached to a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestAuth {
    user_id: Option<String>,
    pub(crate) bearer: Option<SecretString>,
    pub(crate) cookie: Option<SecretString>,
}

impl RequestAuth {
    /// The `acting_as_id` for user-scoped payloads.
    pub fn acting_as_id(&self) -> Result<&str, AuthError> {
        self.user_id.as_deref().ok_or(AuthError::NotAuthenticated)
    }

    pub(crate) fn authorization_header(&self) -> Option<String> {
        self.bearer
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    pub(crate) fn cookie_header(&self) -> Option<String> {
        self.cookie
            .as_ref()
            .map(|c| format!("session={}", c.expose_secret()))
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Body of `POST /api/identity/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub remember: bool,
}

/// Login response. Only the fields the session needs are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub user_list: Vec<LoginUser>,
    #[serde(default)]
    pub distill_token: Option<String>,
    #[serde(default)]
    pub rakaia_token: Option<String>,
}

/// One entry of the login response's `user_list`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub id: String,
}

/// Body of `POST /api/identity/reauthenticate`.
#[derive(Debug, Serialize)]
pub struct ReauthRequest<'a> {
    pub password: &'a str,
    pub acting_as_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(distill: &str, rakaia: &str) -> Session {
        Session {
            user_id: "user-1".into(),
            password: SecretString::from("hunter2"),
            distill_token: SecretString::from(distill),
            rakaia_token: SecretString::from(rakaia),
            cookie: Some(SecretString::from("cookie-1")),
        }
    }

    #[test]
    fn test_scope_selects_token() {
        let s = session("distill-1", "rakaia-1");

        let primary = s.request_auth(AuthScope::Primary).unwrap();
        assert_eq!(primary.authorization_header().unwrap(), "Bearer distill-1");
        assert_eq!(primary.cookie_header().unwrap(), "session=cookie-1");
        assert_eq!(primary.acting_as_id().unwrap(), "user-1");

        let portfolio = s.request_auth(AuthScope::Portfolio).unwrap();
        assert_eq!(portfolio.authorization_header().unwrap(), "Bearer rakaia-1");
    }

    #[test]
    fn test_public_scope_carries_nothing() {
        let auth = session("d", "r").request_auth(AuthScope::Public).unwrap();
        assert!(auth.authorization_header().is_none());
        assert!(auth.cookie_header().is_none());
        assert!(matches!(auth.acting_as_id(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let s = session("", "rakaia-1");
        assert!(matches!(
            s.request_auth(AuthScope::Primary),
            Err(AuthError::NotAuthenticated)
        ));
        assert!(s.request_auth(AuthScope::Portfolio).is_ok());
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let rendered = format!("{:?}", session("distill-1", "rakaia-1"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("distill-1"));
        assert!(!rendered.contains("cookie-1"));
        assert!(rendered.contains("user-1"));
    }

    #[test]
    fn test_login_response_unauthenticated_shape() {
        let resp: LoginResponse = serde_json::from_str(r#"{"authenticated": false}"#).unwrap();
        assert!(!resp.authenticated);
        assert!(resp.user_list.is_empty());
        assert!(resp.distill_token.is_none());
    }
}
