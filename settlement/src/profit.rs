//! Profit/loss derivation from the exchange-rate spread.
//!
//! The result is always expressed in AED. The same function serves both
//! the creation-time value stored on the transaction and the live
//! recomputation in reporting, so the two can never drift apart.

use rust_decimal::Decimal;
use sarraf_common::ExchangeDirection;
use sarraf_rates::RateQuote;

/// Profit or loss, in AED, of a transfer executed at `rate` and valued
/// against `quote`.
///
/// Normal direction (customer sells AED): the customer pays `amount`
/// AED and receives `amount * rate` SDG; valuing those pounds back at
/// the quote's buy rate gives their real AED worth, and the difference
/// is the margin kept.
///
/// Reverse direction (customer buys AED): the customer pays `amount`
/// SDG and receives `amount / rate` AED; acquiring those dirhams at the
/// quote's sell rate would cost `amount / quote.sell` AED, and the
/// difference is the margin kept.
///
/// Returns zero when the rate snapshot or the relevant quote side is
/// zero.
pub fn profit_loss(
    amount: Decimal,
    direction: ExchangeDirection,
    rate: Decimal,
    quote: &RateQuote,
) -> Decimal {
    if rate.is_zero() {
        return Decimal::ZERO;
    }

    match direction {
        ExchangeDirection::Normal => {
            if quote.buy.is_zero() {
                return Decimal::ZERO;
            }
            let paid_aed = amount;
            let received_sdg = amount * rate;
            let real_value_aed = received_sdg / quote.buy;
            paid_aed - real_value_aed
        }
        ExchangeDirection::Reverse => {
            if quote.sell.is_zero() {
                return Decimal::ZERO;
            }
            let received_aed = amount / rate;
            let cost_aed = amount / quote.sell;
            received_aed - cost_aed
        }
    }
}
