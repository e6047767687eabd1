//! HTTP client layer — `SharesiesHttp`, the authenticated request capability.

pub mod client;

pub use client::SharesiesHttp;
