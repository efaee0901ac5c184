//! Rate service over the stored history.

use crate::quote::RateQuote;
use rust_decimal::Decimal;
use sarraf_common::{ExchangeRate, Result, SarrafError, UserId};
use sarraf_store::Store;
use std::sync::Arc;
use tracing::info;

/// Holds the current buy/sell rate pair and its append-only history.
#[derive(Clone)]
pub struct RateService {
    store: Arc<Store>,
}

impl RateService {
    /// Create a rate service over a store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// The current quote: the head of the history, or the zero quote if
    /// no rate has been recorded.
    pub fn current(&self) -> Result<RateQuote> {
        let rates = self.store.rates()?;
        Ok(rates
            .first()
            .map(|rate| RateQuote::new(rate.buy_rate, rate.sell_rate))
            .unwrap_or_else(RateQuote::zero))
    }

    /// Full rate history, most recent first.
    pub fn history(&self) -> Result<Vec<ExchangeRate>> {
        self.store.rates()
    }

    /// Record a new quote at the head of the history.
    ///
    /// Fails with `InvalidRate` if either value is non-positive and with
    /// `InvalidSpread` if the sell rate does not exceed the buy rate.
    /// Existing records are never edited.
    pub fn update(&self, buy: Decimal, sell: Decimal, actor: UserId) -> Result<ExchangeRate> {
        if buy <= Decimal::ZERO || sell <= Decimal::ZERO {
            return Err(SarrafError::InvalidRate { buy, sell });
        }
        if sell <= buy {
            return Err(SarrafError::InvalidSpread { buy, sell });
        }

        let record = ExchangeRate::new(buy, sell, actor);
        let mut history = self.store.rates()?;
        history.insert(0, record.clone());
        self.store.save_rates(&history)?;

        info!(
            buy = %buy,
            sell = %sell,
            updated_by = %actor,
            "Recorded exchange rate"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<Store>, RateService, UserId) {
        let store = Arc::new(Store::in_memory());
        let service = RateService::new(store.clone());
        (store, service, UserId::new())
    }

    #[test]
    fn test_current_defaults_to_zero() {
        let (_store, service, _actor) = setup();
        assert_eq!(service.current().unwrap(), RateQuote::zero());
    }

    #[test]
    fn test_update_prepends() {
        let (_store, service, actor) = setup();

        service.update(dec!(200), dec!(202), actor).unwrap();
        service.update(dec!(205), dec!(208), actor).unwrap();

        let history = service.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].buy_rate, dec!(205));
        assert_eq!(history[1].buy_rate, dec!(200));
        assert_eq!(service.current().unwrap(), RateQuote::new(dec!(205), dec!(208)));
    }

    #[test]
    fn test_update_never_mutates_history() {
        let (_store, service, actor) = setup();

        let first = service.update(dec!(200), dec!(202), actor).unwrap();
        service.update(dec!(210), dec!(212), actor).unwrap();

        let history = service.history().unwrap();
        assert_eq!(history[1].id, first.id);
        assert_eq!(history[1].buy_rate, dec!(200));
        assert_eq!(history[1].sell_rate, dec!(202));
    }

    #[test]
    fn test_current_is_idempotent() {
        let (_store, service, actor) = setup();
        service.update(dec!(200), dec!(202), actor).unwrap();

        let first = service.current().unwrap();
        let second = service.current().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        let (_store, service, actor) = setup();

        assert!(matches!(
            service.update(dec!(0), dec!(202), actor),
            Err(SarrafError::InvalidRate { .. })
        ));
        assert!(matches!(
            service.update(dec!(200), dec!(-1), actor),
            Err(SarrafError::InvalidRate { .. })
        ));
        assert!(service.history().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_inverted_spread() {
        let (_store, service, actor) = setup();

        assert!(matches!(
            service.update(dec!(202), dec!(202), actor),
            Err(SarrafError::InvalidSpread { .. })
        ));
        assert!(matches!(
            service.update(dec!(202), dec!(200), actor),
            Err(SarrafError::InvalidSpread { .. })
        ));
        assert!(service.history().unwrap().is_empty());
    }
}
