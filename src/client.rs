//! High-level client — `SharesiesClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared session state, and accessor methods.

use crate::auth::client::Auth;
use crate::auth::{AuthScope, RequestAuth, Session};
use crate::domain::account::client::Account;
use crate::domain::fx::client::Fx;
use crate::domain::instrument::client::Instruments;
use crate::domain::order::client::Orders;
use crate::domain::portfolio::client::Portfolios;
use crate::error::{AuthError, SdkError};
use crate::http::SharesiesHttp;
use crate::shared::PageOptions;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::account::client::Account as AccountClient;
pub use crate::domain::fx::client::Fx as FxClient;
pub use crate::domain::instrument::client::Instruments as InstrumentsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::portfolio::client::Portfolios as PortfoliosClient;

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub(crate) app_url: String,
    pub(crate) data_url: String,
    pub(crate) portfolio_url: String,
    pub(crate) pages: PageOptions,
    pub(crate) strict_reauth: bool,
}

/// The primary entry point for the Sharesies SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.auth()`, `client.instruments()`, `client.fx()`, etc.
///
/// Cloning is cheap and clones share the same session.
#[derive(Clone)]
pub struct SharesiesClient {
    pub(crate) http: SharesiesHttp,
    pub(crate) config: Arc<ClientConfig>,
    /// Internal session state. Read concurrently, written only by login/logout.
    pub(crate) session: Arc<RwLock<Option<Session>>>,
}

impl SharesiesClient {
    pub fn builder() -> SharesiesClientBuilder {
        SharesiesClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn instruments(&self) -> Instruments<'_> {
        Instruments { client: self }
    }

    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn fx(&self) -> Fx<'_> {
        Fx { client: self }
    }

    pub fn portfolios(&self) -> Portfolios<'_> {
        Portfolios { client: self }
    }

    /// Snapshot the session into auth material for one request.
    ///
    /// Fails before any network traffic when no session is held.
    pub(crate) async fn authorize(&self, scope: AuthScope) -> Result<RequestAuth, AuthError> {
        if scope == AuthScope::Public {
            return Ok(RequestAuth::default());
        }
        match self.session.read().await.as_ref() {
            Some(session) => session.request_auth(scope),
            None => Err(AuthError::NotAuthenticated),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SharesiesClientBuilder {
    app_url: String,
    data_url: String,
    portfolio_url: String,
    user_agent: String,
    timeout: Duration,
    pages: PageOptions,
    strict_reauth: bool,
}

impl Default for SharesiesClientBuilder {
    fn default() -> Self {
        Self {
            app_url: crate::network::DEFAULT_APP_URL.to_string(),
            data_url: crate::network::DEFAULT_DATA_URL.to_string(),
            portfolio_url: crate::network::DEFAULT_PORTFOLIO_URL.to_string(),
            user_agent: crate::network::DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            pages: PageOptions::default(),
            strict_reauth: false,
        }
    }
}

impl SharesiesClientBuilder {
    pub fn app_url(mut self, url: &str) -> Self {
        self.app_url = url.to_string();
        self
    }

    pub fn data_url(mut self, url: &str) -> Self {
        self.data_url = url.to_string();
        self
    }

    pub fn portfolio_url(mut self, url: &str) -> Self {
        self.portfolio_url = url.to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Per-request timeout applied by the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bound the number of concurrent page workers. Unbounded by default.
    pub fn max_concurrent_pages(mut self, limit: usize) -> Self {
        self.pages.max_concurrent_pages = Some(limit);
        self
    }

    /// Fetch the final declared page during aggregation (skipped by default).
    pub fn include_last_page(mut self, include: bool) -> Self {
        self.pages.include_last_page = include;
        self
    }

    /// Abort orders and transfers when re-authentication is rejected.
    ///
    /// Off by default: a rejected re-auth is logged and the operation proceeds
    /// on the existing session.
    pub fn strict_reauth(mut self, strict: bool) -> Self {
        self.strict_reauth = strict;
        self
    }

    pub fn build(self) -> Result<SharesiesClient, SdkError> {
        Ok(SharesiesClient {
            http: SharesiesHttp::new(&self.user_agent, self.timeout)?,
            config: Arc::new(ClientConfig {
                app_url: self.app_url.trim_end_matches('/').to_string(),
                data_url: self.data_url.trim_end_matches('/').to_string(),
                portfolio_url: self.portfolio_url.trim_end_matches('/').to_string(),
                pages: self.pages,
                strict_reauth: self.strict_reauth,
            }),
            session: Arc::new(RwLock::new(None)),
        })
    }
}
