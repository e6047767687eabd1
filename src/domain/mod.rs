//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types and pure business rules
//! - `wire.rs` — Raw serde structs matching backend requests/responses
//! - `client.rs` — Sub-client with HTTP methods

pub mod account;
pub mod fx;
pub mod instrument;
pub mod order;
pub mod portfolio;
