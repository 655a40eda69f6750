/// A matchup used to fabricate substitute events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventTemplate {
    pub home: &'static str,
    pub away: &'static str,
}

impl EventTemplate {
    const fn new(home: &'static str, away: &'static str) -> Self {
        Self { home, away }
    }

    pub fn name(&self) -> String {
        format!("{} vs {}", self.home, self.away)
    }
}

pub const SOCCER: &[EventTemplate] = &[
    EventTemplate::new("Real Madrid", "Barcelona"),
    EventTemplate::new("Manchester United", "Liverpool"),
    EventTemplate::new("Bayern Munich", "Borussia Dortmund"),
    EventTemplate::new("PSG", "Marseille"),
    EventTemplate::new("Flamengo", "Palmeiras"),
    EventTemplate::new("Santos", "Corinthians"),
    EventTemplate::new("Inter", "Milan"),
    EventTemplate::new("Arsenal", "Chelsea"),
];

pub const TENNIS: &[EventTemplate] = &[
    EventTemplate::new("Djokovic", "Nadal"),
    EventTemplate::new("Federer", "Murray"),
    EventTemplate::new("Serena Williams", "Sharapova"),
    EventTemplate::new("Tsitsipas", "Zverev"),
];

/// Templates for `sport`; unknown sports get the soccer list.
pub fn for_sport(sport: &str) -> &'static [EventTemplate] {
    match sport.trim().to_lowercase().as_str() {
        "tennis" => TENNIS,
        _ => SOCCER,
    }
}
