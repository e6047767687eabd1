//! FX domain — exchange quotes and currency transfer orders.
//!
//! The transfer arithmetic must match what the backend expects exactly:
//!
//! ```text
//! fee    = source_amount * 0.004975
//! raw    = (source_amount - fee) * rate
//! target = floor(raw * 100) / 100
//! ```
//!
//! Everything is computed in `Decimal`, so there is no float drift before the
//! floor.

pub mod client;
pub mod wire;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TransferError;
use crate::shared::Currency;

/// Fee charged on the source amount of a currency exchange.
pub const FX_FEE_RATE: Decimal = dec!(0.004975);

/// Smallest target amount the backend accepts.
pub const MIN_TARGET_AMOUNT: Decimal = dec!(0.01);

/// A live source → target rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    pub source_currency: Currency,
    pub target_currency: Currency,
    #[serde(deserialize_with = "crate::shared::serde_util::lenient_decimal::deserialize")]
    pub rate: Decimal,
}

/// `buy_or_sell` value of every transfer: the source balance is sold.
pub const TRANSFER_DIRECTION: &str = "sell";

/// A fully computed currency transfer, ready to submit as a sell of the
/// source currency.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOrder {
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub quoted_rate: Decimal,
    pub source_amount: Decimal,
    pub source_fee: Decimal,
    pub target_amount: Decimal,
    /// Always [`TRANSFER_DIRECTION`].
    pub direction: &'static str,
}

/// First quote matching the exact (source, target) pair.
pub fn select_quote<'q>(
    quotes: &'q [ExchangeQuote],
    source: &Currency,
    target: &Currency,
) -> Result<&'q ExchangeQuote, TransferError> {
    quotes
        .iter()
        .find(|q| &q.source_currency == source && &q.target_currency == target)
        .ok_or_else(|| TransferError::NoRateFound {
            source_currency: source.to_string(),
            target_currency: target.to_string(),
        })
}

/// Compute fee and target amount for converting `source_amount` at `quote`.
pub fn compute_transfer(
    quote: &ExchangeQuote,
    source_amount: Decimal,
) -> Result<TransferOrder, TransferError> {
    let out_of_range = || TransferError::AmountOutOfRange {
        source_amount,
        rate: quote.rate,
    };

    let source_fee = source_amount
        .checked_mul(FX_FEE_RATE)
        .ok_or_else(out_of_range)?;
    let raw_target = source_amount
        .checked_sub(source_fee)
        .and_then(|net| net.checked_mul(quote.rate))
        .ok_or_else(out_of_range)?;
    let target_amount = raw_target
        .checked_mul(dec!(100))
        .and_then(|cents| cents.floor().checked_div(dec!(100)))
        .ok_or_else(out_of_range)?;

    if target_amount < MIN_TARGET_AMOUNT {
        return Err(TransferError::AmountTooSmall { target_amount });
    }

    Ok(TransferOrder {
        source_currency: quote.source_currency.clone(),
        target_currency: quote.target_currency.clone(),
        quoted_rate: quote.rate,
        source_amount,
        source_fee,
        target_amount,
        direction: TRANSFER_DIRECTION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(source: &str, target: &str, rate: Decimal) -> ExchangeQuote {
        ExchangeQuote {
            source_currency: Currency::from(source),
            target_currency: Currency::from(target),
            rate,
        }
    }

    #[test]
    fn test_compute_transfer_fee_and_truncation() {
        let order = compute_transfer(&quote("nzd", "usd", dec!(1.5)), dec!(100)).unwrap();
        assert_eq!(order.source_fee, dec!(0.4975));
        assert_eq!(order.target_amount, dec!(149.25));
        assert_eq!(order.quoted_rate, dec!(1.5));
        assert_eq!(order.direction, "sell");
    }

    #[test]
    fn test_compute_transfer_floors_instead_of_rounding() {
        // raw = 99.5025 * 0.6 = 59.7015 -> 59.70, never 59.71
        let order = compute_transfer(&quote("nzd", "usd", dec!(0.6)), dec!(100)).unwrap();
        assert_eq!(order.target_amount, dec!(59.70));

        // raw = 9.95025 * 0.999 = 9.94029975 -> 9.94
        let order = compute_transfer(&quote("nzd", "aud", dec!(0.999)), dec!(10)).unwrap();
        assert_eq!(order.target_amount, dec!(9.94));
    }

    #[test]
    fn test_compute_transfer_amount_too_small() {
        let err = compute_transfer(&quote("nzd", "usd", dec!(0.01)), dec!(1)).unwrap_err();
        assert_eq!(
            err,
            TransferError::AmountTooSmall {
                target_amount: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_compute_transfer_exact_minimum_passes() {
        // raw = (101 - 0.502475) * 0.01 = 1.00497525 -> 1.00
        let order = compute_transfer(&quote("usd", "nzd", dec!(0.01)), dec!(101)).unwrap();
        assert_eq!(order.target_amount, dec!(1.00));
    }

    #[test]
    fn test_compute_transfer_overflow_is_an_error() {
        let err = compute_transfer(&quote("nzd", "usd", dec!(2)), Decimal::MAX).unwrap_err();
        assert_eq!(
            err,
            TransferError::AmountOutOfRange {
                source_amount: Decimal::MAX,
                rate: dec!(2),
            }
        );

        // The target fits but scaling it to cents does not.
        let err = compute_transfer(&quote("nzd", "usd", dec!(0.5)), Decimal::MAX).unwrap_err();
        assert!(matches!(err, TransferError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_select_quote_exact_pair() {
        let quotes = vec![
            quote("usd", "nzd", dec!(1.6)),
            quote("nzd", "usd", dec!(0.6)),
            quote("nzd", "usd", dec!(0.7)),
        ];
        let q = select_quote(&quotes, &"nzd".into(), &"usd".into()).unwrap();
        assert_eq!(q.rate, dec!(0.6));
    }

    #[test]
    fn test_select_quote_missing_pair() {
        let quotes = vec![quote("usd", "nzd", dec!(1.6))];
        let err = select_quote(&quotes, &"nzd".into(), &"aud".into()).unwrap_err();
        assert!(matches!(err, TransferError::NoRateFound { .. }));
    }

    #[test]
    fn test_quote_rate_parses_from_decimal_string() {
        let q: ExchangeQuote = serde_json::from_str(
            r#"{"source_currency": "nzd", "target_currency": "usd", "rate": "0.5931"}"#,
        )
        .unwrap();
        assert_eq!(q.rate, dec!(0.5931));

        let q: ExchangeQuote = serde_json::from_str(
            r#"{"source_currency": "nzd", "target_currency": "usd", "rate": 0.5931}"#,
        )
        .unwrap();
        assert_eq!(q.rate, dec!(0.5931));
    }
}
