//! Portfolio domain — served by the portfolio host, authenticated with the
//! secondary (rakaia) token rather than the primary one.

pub mod client;
