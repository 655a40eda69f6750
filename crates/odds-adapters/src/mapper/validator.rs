//! Odds validation at the adapter boundary.
//!
//! Every selection leaving an adapter passes through here:
//! - Odds below 1.0 are invalid (a bet that returns less than the stake)
//! - Odds outside the provider's `[min_odds, max_odds]` are out of range
//!   (live data only; substitute data uses [`OddsValidator::default`])
//!
//! Rejected selections are dropped. Markets left with no selections are
//! dropped with them. Events are always kept.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{CanonicalEvent, CanonicalMarket, CanonicalSelection};
use crate::settings::ProviderSettings;

/// Why a selection was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OddsRejection {
    /// Odds below 1.0; never valid for any provider.
    BelowOne,
    /// Under the provider's minimum.
    BelowMinimum,
    /// Over the provider's maximum.
    AboveMaximum,
}

/// Boundary guard for selection odds.
#[derive(Clone, Debug)]
pub struct OddsValidator {
    min_odds: Decimal,
    max_odds: Decimal,
}

impl Default for OddsValidator {
    /// Only the `odds >= 1.0` invariant, no range.
    fn default() -> Self {
        Self {
            min_odds: Decimal::ONE,
            max_odds: Decimal::MAX,
        }
    }
}

impl OddsValidator {
    pub fn new(min_odds: Decimal, max_odds: Decimal) -> Self {
        Self { min_odds, max_odds }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self::new(settings.min_odds(), settings.max_odds())
    }

    pub fn check(&self, odds: Decimal) -> Result<(), OddsRejection> {
        if odds < Decimal::ONE {
            Err(OddsRejection::BelowOne)
        } else if odds < self.min_odds {
            Err(OddsRejection::BelowMinimum)
        } else if odds > self.max_odds {
            Err(OddsRejection::AboveMaximum)
        } else {
            Ok(())
        }
    }

    pub fn validate_events(&self, events: Vec<CanonicalEvent>) -> Vec<CanonicalEvent> {
        events
            .into_iter()
            .map(|mut event| {
                let markets = std::mem::take(&mut event.markets);
                event.markets = self.validate_markets_for(&event.provider, &event.id, markets);
                event
            })
            .collect()
    }

    pub fn validate_markets(&self, markets: Vec<CanonicalMarket>) -> Vec<CanonicalMarket> {
        self.validate_markets_for("", "", markets)
    }

    fn validate_markets_for(
        &self,
        provider: &str,
        event_id: &str,
        markets: Vec<CanonicalMarket>,
    ) -> Vec<CanonicalMarket> {
        markets
            .into_iter()
            .filter_map(|mut market| {
                let before = market.selections.len();
                market.selections = self.validate_selections(provider, event_id, market.selections);
                if market.selections.is_empty() && before > 0 {
                    debug!(
                        provider,
                        event_id,
                        market_type = %market.market_type,
                        "Dropping market with no valid selections"
                    );
                    None
                } else {
                    Some(market)
                }
            })
            .collect()
    }

    fn validate_selections(
        &self,
        provider: &str,
        event_id: &str,
        selections: Vec<CanonicalSelection>,
    ) -> Vec<CanonicalSelection> {
        selections
            .into_iter()
            .filter(|selection| match self.check(selection.odds) {
                Ok(()) => true,
                Err(OddsRejection::BelowOne) => {
                    warn!(
                        provider,
                        event_id,
                        selection = %selection.name,
                        odds = %selection.odds,
                        "Rejected selection with odds below 1.0"
                    );
                    false
                }
                Err(reason) => {
                    debug!(
                        provider,
                        event_id,
                        selection = %selection.name,
                        odds = %selection.odds,
                        ?reason,
                        "Selection outside accepted odds range"
                    );
                    false
                }
            })
            .collect()
    }
}
