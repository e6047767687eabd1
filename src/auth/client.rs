//! Auth sub-client — login, logout, re-authentication.

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::auth::{AuthScope, LoginRequest, LoginResponse, ReauthRequest, RequestAuth, Session};
use crate::client::SharesiesClient;
use crate::error::{AuthError, HttpError, SdkError};

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a SharesiesClient,
}

impl<'a> Auth<'a> {
    /// Log in with email and password.
    ///
    /// Returns `Ok(false)` when the backend answers `authenticated: false`;
    /// that is an expected outcome, not an error. On success the session
    /// (user id, password, both tokens and the `session` cookie) replaces any
    /// previous one.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool, SdkError> {
        let request = LoginRequest {
            email,
            password,
            remember: true,
        };
        let url = format!("{}/api/identity/login", self.client.config.app_url);

        let resp = self
            .client
            .http
            .dispatch(Method::POST, &url, Some(&request), &RequestAuth::default())
            .await?;
        let status = resp.status();
        let cookie = resp
            .cookies()
            .find(|c| c.name() == "session")
            .map(|c| SecretString::from(c.value().to_string()));
        let body = resp.text().await.map_err(HttpError::from)?;

        if !status.is_success() {
            // Bad credentials may come back as a 4xx carrying `authenticated: false`.
            if status.is_client_error() && is_rejected_login(&body) {
                tracing::info!(status = status.as_u16(), "login rejected: not authenticated");
                return Ok(false);
            }
            return Err(HttpError::from_status(status.as_u16(), body).into());
        }

        let login: LoginResponse = serde_json::from_str(&body)?;
        if !login.authenticated {
            tracing::info!("login rejected: not authenticated");
            return Ok(false);
        }

        let user = login
            .user_list
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::LoginFailed("login response has no user".into()))?;
        let distill_token = login
            .distill_token
            .ok_or_else(|| AuthError::LoginFailed("login response has no distill_token".into()))?;
        let rakaia_token = login
            .rakaia_token
            .ok_or_else(|| AuthError::LoginFailed("login response has no rakaia_token".into()))?;

        tracing::info!(user_id = %user.id, "logged in");

        *self.client.session.write().await = Some(Session {
            user_id: user.id,
            password: SecretString::from(password.to_string()),
            distill_token: SecretString::from(distill_token),
            rakaia_token: SecretString::from(rakaia_token),
            cookie,
        });

        Ok(true)
    }

    /// Clear the local session. Idempotent, and does not contact the server.
    pub async fn logout(&self) {
        if self.client.session.write().await.take().is_some() {
            tracing::info!("logged out");
        }
    }

    /// Re-assert the session server-side with the stored password.
    ///
    /// `Ok(true)` iff the backend answered with a success status. Tokens are
    /// not rotated.
    pub async fn reauth(&self) -> Result<bool, SdkError> {
        Ok(self.reauth_status().await?.is_success())
    }

    async fn reauth_status(&self) -> Result<StatusCode, SdkError> {
        let (auth, password) = {
            let guard = self.client.session.read().await;
            let session = guard.as_ref().ok_or(AuthError::NotAuthenticated)?;
            (
                session.request_auth(AuthScope::Primary)?,
                session.password.clone(),
            )
        };

        let body = ReauthRequest {
            password: password.expose_secret(),
            acting_as_id: auth.acting_as_id()?,
        };
        let url = format!("{}/api/identity/reauthenticate", self.client.config.app_url);
        Ok(self.client.http.post_for_status(&url, &body, &auth).await?)
    }

    /// Re-authenticate ahead of a staleness-sensitive operation.
    ///
    /// A rejected re-auth is logged and the caller proceeds anyway, unless the
    /// client was built with `strict_reauth(true)`.
    pub(crate) async fn refresh(&self) -> Result<(), SdkError> {
        let status = self.reauth_status().await?;
        if status.is_success() {
            return Ok(());
        }
        if self.client.config.strict_reauth {
            return Err(AuthError::ReauthFailed(status.as_u16()).into());
        }
        tracing::warn!(
            status = status.as_u16(),
            "re-authentication rejected; proceeding with the existing session"
        );
        Ok(())
    }

    /// Whether a session is held locally. No server round trip.
    pub async fn is_authenticated(&self) -> bool {
        self.client.session.read().await.is_some()
    }

    /// The logged-in user id, if any.
    pub async fn user_id(&self) -> Option<String> {
        self.client
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.user_id().to_string())
    }
}

fn is_rejected_login(body: &str) -> bool {
    serde_json::from_str::<LoginResponse>(body).is_ok_and(|login| !login.authenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_login_body() {
        assert!(is_rejected_login(r#"{"authenticated": false, "type": "identity_email_or_password_wrong"}"#));
        assert!(!is_rejected_login(r#"{"authenticated": true}"#));
        assert!(!is_rejected_login("Unauthorized"));
        assert!(!is_rejected_login(""));
    }
}
