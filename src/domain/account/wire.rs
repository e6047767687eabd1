//! Wire types for identity and accounting endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::Transaction;
use crate::shared::Currency;

/// `GET /api/accounting/transaction-history`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionHistoryResponse {
    pub transactions: Vec<Transaction>,
    pub has_more: bool,
}

/// The part of `GET /api/identity/check` that carries wallet balances.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityCheck {
    pub user: IdentityUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    /// Balances arrive as strings or numbers; `null` reads as zero.
    #[serde(deserialize_with = "crate::shared::serde_util::lenient_decimal_map::deserialize")]
    pub wallet_balances: HashMap<Currency, Decimal>,
}
