//! Raw provider payload to canonical schema.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::PayloadError;
use crate::models::{CanonicalEvent, CanonicalMarket, CanonicalSelection, EventStatus, ProviderName};

/// Top-level key holding the event list of an odds payload.
pub const EVENTS_CONTAINER: &str = "doc";

/// Top-level key holding the market list of an event-detail payload.
pub const MARKETS_CONTAINER: &str = "markets";

/// Maps one provider's raw payloads into canonical events and markets.
///
/// Items are expected in roughly canonical shape already
/// (`id`, `name`, `sport`, `start_time`, `markets`); missing fields get
/// empty defaults. The mapper never fails: absent or malformed payloads
/// map to an empty list.
#[derive(Clone, Debug)]
pub struct CanonicalMapper {
    provider: ProviderName,
}

impl CanonicalMapper {
    pub fn new(provider: ProviderName) -> Self {
        Self { provider }
    }

    /// Map up to `limit` events, stamping `status` and the provider name.
    pub fn to_canonical(
        &self,
        payload: &Value,
        status: EventStatus,
        limit: usize,
    ) -> Vec<CanonicalEvent> {
        self.try_to_canonical(payload, status, limit)
            .unwrap_or_else(|e| {
                self.report(&e, EVENTS_CONTAINER);
                Vec::new()
            })
    }

    /// Like [`to_canonical`](Self::to_canonical), but says why nothing came back.
    pub fn try_to_canonical(
        &self,
        payload: &Value,
        status: EventStatus,
        limit: usize,
    ) -> Result<Vec<CanonicalEvent>, PayloadError> {
        let items = container(payload, EVENTS_CONTAINER)?;

        Ok(items
            .iter()
            .take(limit)
            .filter_map(|item| match item.as_object() {
                Some(fields) => Some(self.map_event(fields, status)),
                None => {
                    debug!(provider = %self.provider, "Skipping non-object event item");
                    None
                }
            })
            .collect())
    }

    /// Markets from an event-detail payload.
    pub fn markets_from_detail(&self, payload: &Value) -> Vec<CanonicalMarket> {
        self.try_markets_from_detail(payload).unwrap_or_else(|e| {
            self.report(&e, MARKETS_CONTAINER);
            Vec::new()
        })
    }

    pub fn try_markets_from_detail(
        &self,
        payload: &Value,
    ) -> Result<Vec<CanonicalMarket>, PayloadError> {
        let items = container(payload, MARKETS_CONTAINER)?;
        Ok(map_markets(items))
    }

    fn map_event(&self, fields: &Map<String, Value>, status: EventStatus) -> CanonicalEvent {
        CanonicalEvent {
            id: text(fields.get("id")),
            name: text(fields.get("name")),
            sport: text(fields.get("sport")),
            status,
            start_time: fields.get("start_time").and_then(timestamp),
            provider: self.provider.to_string(),
            markets: fields
                .get("markets")
                .and_then(Value::as_array)
                .map(|m| map_markets(m))
                .unwrap_or_default(),
        }
    }

    fn report(&self, error: &PayloadError, expected: &'static str) {
        match error {
            PayloadError::Empty => {
                debug!(provider = %self.provider, "Upstream payload was empty")
            }
            _ => warn!(
                provider = %self.provider,
                container = expected,
                error = %error,
                "Malformed upstream payload, treating as no data"
            ),
        }
    }
}

fn container<'a>(payload: &'a Value, key: &'static str) -> Result<&'a Vec<Value>, PayloadError> {
    match payload {
        Value::Null => Err(PayloadError::Empty),
        Value::Object(fields) => match fields.get(key) {
            None | Some(Value::Null) => Err(PayloadError::MissingContainer(key)),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(PayloadError::NotAnArray(key)),
        },
        _ => Err(PayloadError::MissingContainer(key)),
    }
}

fn map_markets(items: &[Value]) -> Vec<CanonicalMarket> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|fields| CanonicalMarket {
            market_type: text(fields.get("type")),
            name: text(fields.get("name")),
            selections: fields
                .get("selections")
                .and_then(Value::as_array)
                .map(|s| map_selections(s))
                .unwrap_or_default(),
        })
        .collect()
}

fn map_selections(items: &[Value]) -> Vec<CanonicalSelection> {
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|fields| {
            let name = text(fields.get("name"));
            match fields.get("odds").and_then(odds) {
                Some(price) => Some(CanonicalSelection::new(name, price)),
                None => {
                    debug!(selection = %name, "Dropping selection without usable odds");
                    None
                }
            }
        })
        .collect()
}

/// String field with an empty default; numbers are stringified.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn odds(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// RFC 3339, naive ISO 8601 (taken as UTC) or unix seconds.
fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::borrow::Cow;

    fn mapper() -> CanonicalMapper {
        CanonicalMapper::new(Cow::Borrowed("bet365"))
    }

    fn item(n: u32) -> Value {
        json!({
            "id": format!("ev{}", n),
            "name": format!("Team {} vs Team {}", n, n + 1),
            "sport": "soccer",
            "start_time": "2026-10-16T18:30:00Z",
            "markets": [{
                "type": "1X2",
                "name": "Match Result",
                "selections": [
                    { "name": "Home", "odds": 2.1 },
                    { "name": "Draw", "odds": "3.40" },
                    { "name": "Away", "odds": 3.25 }
                ]
            }]
        })
    }

    #[test]
    fn test_truncates_to_limit_and_stamps() {
        let payload = json!({ "doc": (1..=5).map(item).collect::<Vec<_>>() });
        let events = mapper().to_canonical(&payload, EventStatus::Upcoming, 3);

        assert_eq!(events.len(), 3);
        for event in &events {
            assert_eq!(event.status, EventStatus::Upcoming);
            assert_eq!(event.provider, "bet365");
        }
        assert_eq!(events[0].id, "ev1");
        assert_eq!(events[2].id, "ev3");
    }

    #[test]
    fn test_fields_preserved() {
        let payload = json!({ "doc": [item(1)] });
        let events = mapper().to_canonical(&payload, EventStatus::Live, 10);
        let event = &events[0];

        assert_eq!(event.name, "Team 1 vs Team 2");
        assert_eq!(event.sport, "soccer");
        assert_eq!(
            event.start_time,
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 18, 30, 0).unwrap())
        );
        let selections = &event.markets[0].selections;
        assert_eq!(selections[0].odds, dec!(2.1));
        assert_eq!(selections[1].odds, dec!(3.40));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let payload = json!({ "doc": [{}] });
        let events = mapper().to_canonical(&payload, EventStatus::Live, 10);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "");
        assert_eq!(events[0].name, "");
        assert_eq!(events[0].sport, "");
        assert!(events[0].start_time.is_none());
        assert!(events[0].markets.is_empty());
        assert_eq!(events[0].provider, "bet365");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let payload = json!({ "doc": [{ "id": 42, "start_time": 1_700_000_000 }] });
        let events = mapper().to_canonical(&payload, EventStatus::Live, 10);
        assert_eq!(events[0].id, "42");
        assert!(events[0].start_time.is_some());
    }

    #[test]
    fn test_naive_timestamp_taken_as_utc() {
        let payload = json!({ "doc": [{ "start_time": "2026-10-16T18:30:00.123456" }] });
        let events = mapper().to_canonical(&payload, EventStatus::Live, 10);
        let start = events[0].start_time.unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 16, 18, 30, 0).unwrap();
        assert_eq!(start.timestamp(), expected.timestamp());
    }

    #[test]
    fn test_absent_or_malformed_payload_is_empty() {
        let m = mapper();
        assert!(m.to_canonical(&Value::Null, EventStatus::Live, 10).is_empty());
        assert!(m.to_canonical(&json!({ "data": [] }), EventStatus::Live, 10).is_empty());
        assert!(m.to_canonical(&json!({ "doc": "oops" }), EventStatus::Live, 10).is_empty());
        assert!(m.to_canonical(&json!([1, 2, 3]), EventStatus::Live, 10).is_empty());
    }

    #[test]
    fn test_try_reports_reason() {
        let m = mapper();
        assert_eq!(
            m.try_to_canonical(&Value::Null, EventStatus::Live, 1),
            Err(PayloadError::Empty)
        );
        assert_eq!(
            m.try_to_canonical(&json!({}), EventStatus::Live, 1),
            Err(PayloadError::MissingContainer("doc"))
        );
        assert_eq!(
            m.try_to_canonical(&json!({ "doc": {} }), EventStatus::Live, 1),
            Err(PayloadError::NotAnArray("doc"))
        );
    }

    #[test]
    fn test_non_object_items_skipped() {
        let payload = json!({ "doc": [item(1), "junk", 7, item(2)] });
        let events = mapper().to_canonical(&payload, EventStatus::Live, 10);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_selection_without_odds_dropped() {
        let payload = json!({ "markets": [{
            "type": "OU",
            "name": "Total Goals",
            "selections": [{ "name": "Over 2.5" }, { "name": "Under 2.5", "odds": 1.9 }]
        }]});
        let markets = mapper().markets_from_detail(&payload);
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].selections.len(), 1);
        assert_eq!(markets[0].selections[0].name, "Under 2.5");
    }

    #[test]
    fn test_detail_without_markets_is_empty() {
        let m = mapper();
        assert!(m.markets_from_detail(&Value::Null).is_empty());
        assert!(m.markets_from_detail(&json!({ "event": "x" })).is_empty());
    }
}
