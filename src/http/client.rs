//! Low-level HTTP client — `SharesiesHttp`.
//!
//! This is the authenticated request capability every sub-client goes through:
//! one round trip per call, auth material supplied by the caller per request.
//! It holds no session state of its own.

use crate::auth::RequestAuth;
use crate::error::HttpError;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Low-level HTTP client for the Sharesies hosts.
#[derive(Clone)]
pub struct SharesiesHttp {
    client: Client,
}

impl SharesiesHttp {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { client })
    }

    // ── Typed helpers ────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        auth: &RequestAuth,
    ) -> Result<T, HttpError> {
        let resp = self.send(Method::GET, url, None::<&()>, auth).await?;
        Ok(resp.json::<T>().await?)
    }

    pub(crate) async fn get_text(&self, url: &str, auth: &RequestAuth) -> Result<String, HttpError> {
        let resp = self.send(Method::GET, url, None::<&()>, auth).await?;
        Ok(resp.text().await?)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        auth: &RequestAuth,
    ) -> Result<T, HttpError> {
        let resp = self.send(Method::POST, url, Some(body), auth).await?;
        Ok(resp.json::<T>().await?)
    }

    /// POST and report only the status code. Non-success statuses are not errors here.
    pub(crate) async fn post_for_status<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        auth: &RequestAuth,
    ) -> Result<StatusCode, HttpError> {
        let resp = self.dispatch(Method::POST, url, Some(body), auth).await?;
        Ok(resp.status())
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// Send a request and map non-success statuses to [`HttpError`].
    pub(crate) async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        auth: &RequestAuth,
    ) -> Result<Response, HttpError> {
        let resp = self.dispatch(method, url, body, auth).await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(HttpError::from_status(status.as_u16(), body_text))
    }

    /// Send a request and hand back the response whatever its status.
    pub(crate) async fn dispatch<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        auth: &RequestAuth,
    ) -> Result<Response, HttpError> {
        tracing::debug!(%method, url, authenticated = auth.bearer.is_some(), "dispatching request");

        let mut req = self.client.request(method, url);

        if let Some(value) = auth.authorization_header() {
            req = req.header(header::AUTHORIZATION, value);
        }
        if let Some(value) = auth.cookie_header() {
            req = req.header(header::COOKIE, value);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        Ok(req.send().await?)
    }
}
