//! # Sharesies SDK
//!
//! An async Rust client for the Sharesies brokerage REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, page aggregation, domain models and pure rules
//!    (FX transfer arithmetic, fees)
//! 2. **Auth** — In-memory session, per-request auth material, login/logout/reauth
//! 3. **HTTP** — `SharesiesHttp`, one round trip per call
//! 4. **High-Level Client** — `SharesiesClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sharesies_sdk::prelude::*;
//!
//! let client = SharesiesClient::builder().build()?;
//!
//! if client.auth().login("me@example.com", "password").await? {
//!     let instruments = client.instruments().all(false).await?;
//!     let order = client.fx().transfer(&"nzd".into(), &"usd".into(), dec!(100)).await?;
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and page aggregation.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Session state, login, logout, re-authentication.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Low-level HTTP client.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `SharesiesClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Currency, FundId, Page, PageOptions};

    // Domain types
    pub use crate::domain::account::Transaction;
    pub use crate::domain::fx::{
        compute_transfer, select_quote, ExchangeQuote, TransferOrder,
    };
    pub use crate::domain::instrument::Instrument;
    pub use crate::domain::order::{Allocation, AutoInvestInterval, AutoInvestOrder};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError, TransferError};

    // Network
    pub use crate::network::{DEFAULT_APP_URL, DEFAULT_DATA_URL, DEFAULT_PORTFOLIO_URL};

    // Client + sub-clients
    pub use crate::client::{
        AccountClient, AuthClient, FxClient, InstrumentsClient, OrdersClient, PortfoliosClient,
        SharesiesClient, SharesiesClientBuilder,
    };

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
