//! Account domain — identity profile, wallet balances, transaction history.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transactions requested per history page.
pub const TRANSACTION_PAGE_LIMIT: u32 = 50;

/// One wallet transaction. Only `transaction_id` is interpreted; it is the
/// cursor for paging backwards through history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: u64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
