//! Substitute (synthetic) odds generation.
//!
//! Used when an adapter runs without a live integration. Output is
//! schema-valid canonical data with believable cross-provider variance:
//! every price is a random base sample scaled by the provider's fixed odds
//! multiplier. The numbers carry no meaning beyond exercising the pipeline.

mod templates;

pub use templates::{EventTemplate, SOCCER, TENNIS};

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    market_types, CanonicalEvent, CanonicalMarket, CanonicalSelection, EventStatus, ProviderName,
};

/// Inclusive-exclusive sampling range for base odds.
#[derive(Clone, Copy, Debug)]
struct OddsRange(f64, f64);

const LIVE_SIDE: OddsRange = OddsRange(1.5, 4.0);
const LIVE_DRAW: OddsRange = OddsRange(2.8, 3.8);
const UPCOMING_SIDE: OddsRange = OddsRange(1.3, 5.0);
const UPCOMING_DRAW: OddsRange = OddsRange(2.5, 4.2);

const DETAIL_SIDE: OddsRange = OddsRange(1.5, 3.0);
const DETAIL_DRAW: OddsRange = OddsRange(2.8, 3.8);
const DETAIL_TOTALS: OddsRange = OddsRange(1.6, 2.2);
const DETAIL_DC_SIDE: OddsRange = OddsRange(1.2, 1.8);
const DETAIL_DC_NO_DRAW: OddsRange = OddsRange(1.1, 1.4);

/// Total-goals line of the generated over/under market.
pub const TOTALS_LINE: &str = "2.5";

const MAX_LIVE_MINUTES: i64 = 90;
const MAX_UPCOMING_HOURS: i64 = 72;

/// Fabricates canonical events and markets for one provider.
#[derive(Clone, Debug)]
pub struct SubstituteGenerator {
    provider: ProviderName,
    multiplier: Decimal,
}

impl SubstituteGenerator {
    pub fn new(provider: ProviderName, multiplier: Decimal) -> Self {
        Self {
            provider,
            multiplier,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    /// Generate up to `count` events for `sport`, using the thread RNG.
    pub fn generate(&self, sport: &str, status: EventStatus, count: usize) -> Vec<CanonicalEvent> {
        self.generate_with(&mut rand::thread_rng(), sport, status, count)
    }

    /// Generate up to `count` events for `sport` from the given RNG.
    ///
    /// Never yields more events than there are templates for the sport.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        sport: &str,
        status: EventStatus,
        count: usize,
    ) -> Vec<CanonicalEvent> {
        let templates = templates::for_sport(sport);
        let (side, draw) = match status {
            EventStatus::Live => (LIVE_SIDE, LIVE_DRAW),
            EventStatus::Upcoming => (UPCOMING_SIDE, UPCOMING_DRAW),
        };

        templates
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, template)| {
                let now = Utc::now();
                let (id, start_time) = match status {
                    EventStatus::Live => (
                        format!("{}_{}_{}", self.provider, sport, i + 1),
                        now - Duration::minutes(rng.gen_range(1..=MAX_LIVE_MINUTES)),
                    ),
                    EventStatus::Upcoming => (
                        format!("{}_{}_upcoming_{}", self.provider, sport, i + 1),
                        now + Duration::hours(rng.gen_range(1..=MAX_UPCOMING_HOURS)),
                    ),
                };

                let market = CanonicalMarket::new(
                    market_types::MATCH_RESULT,
                    "Match Result",
                    vec![
                        self.selection(rng, template.home, side),
                        self.selection(rng, "Draw", draw),
                        self.selection(rng, template.away, side),
                    ],
                );

                CanonicalEvent {
                    id,
                    name: template.name(),
                    sport: sport.to_string(),
                    status,
                    start_time: Some(start_time),
                    provider: self.provider.to_string(),
                    markets: vec![market],
                }
            })
            .collect()
    }

    /// Markets for an event, using the thread RNG.
    pub fn generate_markets(&self, event_id: &str) -> Vec<CanonicalMarket> {
        self.generate_markets_with(&mut rand::thread_rng(), event_id)
    }

    /// Always the same three market types, whatever the event id.
    pub fn generate_markets_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        _event_id: &str,
    ) -> Vec<CanonicalMarket> {
        vec![
            CanonicalMarket::new(
                market_types::MATCH_RESULT,
                "Match Result",
                vec![
                    self.selection(rng, "Home", DETAIL_SIDE),
                    self.selection(rng, "Draw", DETAIL_DRAW),
                    self.selection(rng, "Away", DETAIL_SIDE),
                ],
            ),
            CanonicalMarket::new(
                market_types::OVER_UNDER,
                "Total Goals",
                vec![
                    self.selection(rng, &format!("Over {}", TOTALS_LINE), DETAIL_TOTALS),
                    self.selection(rng, &format!("Under {}", TOTALS_LINE), DETAIL_TOTALS),
                ],
            ),
            CanonicalMarket::new(
                market_types::DOUBLE_CHANCE,
                "Double Chance",
                vec![
                    self.selection(rng, "1X", DETAIL_DC_SIDE),
                    self.selection(rng, "12", DETAIL_DC_NO_DRAW),
                    self.selection(rng, "X2", DETAIL_DC_SIDE),
                ],
            ),
        ]
    }

    fn selection<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        range: OddsRange,
    ) -> CanonicalSelection {
        let sample = rng.gen_range(range.0..range.1);
        CanonicalSelection::new(name, self.price(sample))
    }

    /// Scale a base sample by the provider multiplier: 2 dp, never below 1.00.
    fn price(&self, sample: f64) -> Decimal {
        let base = Decimal::try_from(sample).unwrap_or(Decimal::ONE);
        let mut odds = (base * self.multiplier)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .max(Decimal::ONE);
        odds.rescale(2);
        odds
    }
}
