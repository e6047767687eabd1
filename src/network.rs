//! Network URL constants for the Sharesies SDK.

/// Account, identity, orders and FX host.
pub const DEFAULT_APP_URL: &str = "https://app.sharesies.nz";

/// Market data host (instruments, price history, dividends).
pub const DEFAULT_DATA_URL: &str = "https://data.sharesies.nz";

/// Portfolio host, authenticated with the secondary token.
pub const DEFAULT_PORTFOLIO_URL: &str = "https://portfolio.sharesies.nz";

/// User agent sent with every request unless overridden on the builder.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 Firefox/71.0";
