#![allow(dead_code)]

use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use surebet_odds_adapters::{SportEntry, UpstreamClient, UpstreamError};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Upstream client with scripted responses and call counters.
pub struct MockUpstreamClient {
    pub taxonomy: Vec<SportEntry>,
    pub taxonomy_failure: Option<UpstreamError>,
    pub taxonomy_delay: Option<Duration>,
    pub odds: Value,
    pub detail: Value,
    pub failure: Option<UpstreamError>,
    pub delay: Option<Duration>,
    pub taxonomy_calls: AtomicUsize,
    pub odds_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub requested_sport_ids: Mutex<Vec<String>>,
}

impl Default for MockUpstreamClient {
    fn default() -> Self {
        Self {
            taxonomy: vec![
                SportEntry::new("1", "Soccer"),
                SportEntry::new("13", "Tennis"),
                SportEntry::new("18", "Basketball"),
            ],
            taxonomy_failure: None,
            taxonomy_delay: None,
            odds: Value::Null,
            detail: Value::Null,
            failure: None,
            delay: None,
            taxonomy_calls: AtomicUsize::new(0),
            odds_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            requested_sport_ids: Mutex::new(Vec::new()),
        }
    }
}

impl MockUpstreamClient {
    pub fn with_taxonomy(mut self, entries: &[(&str, &str)]) -> Self {
        self.taxonomy = entries
            .iter()
            .map(|(id, name)| SportEntry::new(*id, *name))
            .collect();
        self
    }

    pub fn taxonomy_failing(mut self, error: UpstreamError) -> Self {
        self.taxonomy_failure = Some(error);
        self
    }

    pub fn taxonomy_delayed(mut self, delay: Duration) -> Self {
        self.taxonomy_delay = Some(delay);
        self
    }

    pub fn with_odds(mut self, payload: Value) -> Self {
        self.odds = payload;
        self
    }

    pub fn with_detail(mut self, payload: Value) -> Self {
        self.detail = payload;
        self
    }

    pub fn failing(mut self, error: UpstreamError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn taxonomy_calls(&self) -> usize {
        self.taxonomy_calls.load(Ordering::SeqCst)
    }

    pub fn odds_calls(&self) -> usize {
        self.odds_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn requested_sport_ids(&self) -> Vec<String> {
        self.requested_sport_ids.lock().unwrap().clone()
    }

    async fn respond(&self, sport_id: &str, payload: &Value) -> Result<Value, UpstreamError> {
        self.requested_sport_ids
            .lock()
            .unwrap()
            .push(sport_id.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(payload.clone()),
        }
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn get_sport_taxonomy(&self) -> Result<Vec<SportEntry>, UpstreamError> {
        self.taxonomy_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.taxonomy_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.taxonomy_failure {
            Some(e) => Err(e.clone()),
            None => Ok(self.taxonomy.clone()),
        }
    }

    async fn fetch_odds(&self, sport_id: &str) -> Result<Value, UpstreamError> {
        self.odds_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(sport_id, &self.odds).await
    }

    async fn fetch_event_detail(
        &self,
        sport_id: &str,
        _event_id: &str,
    ) -> Result<Value, UpstreamError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(sport_id, &self.detail).await
    }
}

/// Odds payload with `count` two-way events, one selection priced below 1.0.
pub fn odds_payload(sport: &str, count: usize) -> Value {
    let events: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "id": format!("{}-{}", sport, n),
                "name": format!("Home {} vs Away {}", n, n),
                "sport": sport,
                "start_time": "2026-10-16T20:00:00Z",
                "markets": [{
                    "type": "1X2",
                    "name": "Match Result",
                    "selections": [
                        { "name": "Home", "odds": 1.85 },
                        { "name": "Draw", "odds": 3.3 },
                        { "name": "Away", "odds": 0.75 }
                    ]
                }]
            })
        })
        .collect();
    json!({ "doc": events })
}

/// One log event as seen by [`LogCapture`].
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    /// `name=value` pairs, space separated.
    pub fields: String,
}

impl CapturedEvent {
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle) || self.fields.contains(needle)
    }
}

/// Tracing layer recording every event for later assertions.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    /// Install a capturing subscriber for the current thread.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldRecorder::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldRecorder {
    message: String,
    fields: String,
}

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, "{}={} ", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, "{}={:?} ", field.name(), value);
        }
    }
}
