//! Daily profit/loss chart series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sarraf_common::{time, Transaction, TransactionKind, TransactionStatus};
use sarraf_rates::RateQuote;
use sarraf_settlement::profit;
use serde::Serialize;
use std::collections::BTreeMap;

/// One day's aggregated profit/loss, in AED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    /// Calendar day.
    pub day: NaiveDate,
    /// Aggregated profit/loss for the day.
    pub profit_loss: Decimal,
}

fn confirmed_transfers(
    transactions: &[Transaction],
) -> impl Iterator<Item = (&Transaction, Decimal, sarraf_common::ExchangeDirection)> {
    transactions.iter().filter_map(|tx| {
        if tx.status != TransactionStatus::Confirmed {
            return None;
        }
        match &tx.kind {
            TransactionKind::Transfer {
                direction, rate, ..
            } => Some((tx, *rate, *direction)),
            _ => None,
        }
    })
}

fn bucket<F>(transactions: &[Transaction], last_n: usize, value: F) -> Vec<DailyPoint>
where
    F: Fn(&Transaction, Decimal, sarraf_common::ExchangeDirection) -> Decimal,
{
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (tx, rate, direction) in confirmed_transfers(transactions) {
        let day = time::day_of(tx.confirmed_at.unwrap_or(tx.created_at));
        *days.entry(day).or_default() += value(tx, rate, direction);
    }

    let points: Vec<DailyPoint> = days
        .into_iter()
        .map(|(day, profit_loss)| DailyPoint { day, profit_loss })
        .collect();

    let skip = points.len().saturating_sub(last_n);
    points.into_iter().skip(skip).collect()
}

/// Profit/loss per calendar day of confirmation, recomputed live against
/// the given quote, chronological, truncated to the most recent `last_n`
/// days. This is the dashboard chart.
pub fn daily_profit_series(
    transactions: &[Transaction],
    quote: &RateQuote,
    last_n: usize,
) -> Vec<DailyPoint> {
    bucket(transactions, last_n, |tx, rate, direction| {
        profit::profit_loss(tx.amount, direction, rate, quote)
    })
}

/// Profit/loss per calendar day using the values stored at creation,
/// chronological, truncated to the most recent `last_n` days. This is
/// the reports chart.
pub fn stored_daily_profit_series(
    transactions: &[Transaction],
    last_n: usize,
) -> Vec<DailyPoint> {
    bucket(transactions, last_n, |tx, _rate, _direction| {
        match &tx.kind {
            TransactionKind::Transfer { profit_loss, .. } => *profit_loss,
            _ => Decimal::ZERO,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use sarraf_common::{
        ExchangeDirection, TransactionNumber, TransferSource, UserId, VaultId,
    };

    fn confirmed_transfer(
        number: &str,
        amount: Decimal,
        rate: Decimal,
        days_ago: i64,
    ) -> Transaction {
        let mut tx = Transaction::new(
            TransactionNumber::new(number),
            TransactionKind::Transfer {
                source: TransferSource::Cash("Ali".to_string()),
                to_vault: VaultId::new(),
                direction: ExchangeDirection::Normal,
                rate,
                profit_loss: dec!(1),
            },
            amount,
            UserId::new(),
        );
        tx.mark_confirmed(UserId::new());
        tx.confirmed_at = Some(Utc::now() - Duration::days(days_ago));
        tx
    }

    #[test]
    fn test_series_buckets_by_day() {
        let quote = RateQuote::new(dec!(200), dec!(202));
        let transactions = vec![
            confirmed_transfer("T1", dec!(100), dec!(195), 1),
            confirmed_transfer("T2", dec!(100), dec!(195), 1),
            confirmed_transfer("T3", dec!(100), dec!(195), 0),
        ];

        let series = daily_profit_series(&transactions, &quote, 7);

        assert_eq!(series.len(), 2);
        // Chronological: older day first, with both transfers summed.
        assert!(series[0].day < series[1].day);
        assert_eq!(series[0].profit_loss, dec!(5.0));
        assert_eq!(series[1].profit_loss, dec!(2.5));
    }

    #[test]
    fn test_series_truncates_to_most_recent_days() {
        let quote = RateQuote::new(dec!(200), dec!(202));
        let transactions: Vec<_> = (0..10)
            .map(|i| confirmed_transfer(&format!("T{i}"), dec!(100), dec!(195), i))
            .collect();

        let series = daily_profit_series(&transactions, &quote, 7);

        assert_eq!(series.len(), 7);
        // The most recent day survives truncation.
        assert_eq!(series.last().unwrap().day, Utc::now().date_naive());
    }

    #[test]
    fn test_pending_transfers_excluded() {
        let quote = RateQuote::new(dec!(200), dec!(202));
        let mut pending = confirmed_transfer("T1", dec!(100), dec!(195), 0);
        pending.status = TransactionStatus::Pending;

        assert!(daily_profit_series(&[pending], &quote, 7).is_empty());
    }

    #[test]
    fn test_stored_series_uses_creation_values() {
        let transactions = vec![
            confirmed_transfer("T1", dec!(100), dec!(195), 0),
            confirmed_transfer("T2", dec!(100), dec!(195), 0),
        ];

        let series = stored_daily_profit_series(&transactions, 10);

        assert_eq!(series.len(), 1);
        // Each fixture stores a profit of 1.
        assert_eq!(series[0].profit_loss, dec!(2));
    }
}
