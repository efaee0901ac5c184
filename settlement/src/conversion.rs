//! Source-to-destination amount conversion for transfers.

use rust_decimal::Decimal;
use sarraf_common::{Currency, ExchangeDirection};

/// Convert a transfer amount into the destination currency using the
/// transaction's rate snapshot.
///
/// Rates are quoted as SDG per 1 AED, so an SDG source amount divides by
/// the rate and an AED source amount multiplies. A zero rate snapshot
/// (history was empty at creation) leaves the amount unconverted.
pub fn converted_amount(
    amount: Decimal,
    direction: ExchangeDirection,
    rate: Decimal,
) -> Decimal {
    if rate.is_zero() {
        return amount;
    }
    match direction.from_currency() {
        Currency::Sdg => amount / rate,
        Currency::Aed => amount * rate,
    }
}
