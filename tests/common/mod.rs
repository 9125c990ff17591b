#![allow(dead_code)]

use lineup::config::Config;
use lineup::error::{LineupError, LineupResult};
use lineup::lineup_protocol::PlayerRecord;
use lineup::search::PlayerSearch;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn player(id: u64, short_name: &str, club: &str) -> PlayerRecord {
    PlayerRecord {
        id,
        short_name: short_name.to_string(),
        club: Some(club.to_string()),
        positions: vec!["ST".to_string()],
        ..Default::default()
    }
}

pub fn squad() -> Vec<PlayerRecord> {
    vec![
        player(1, "Neymar", "Santos"),
        player(2, "Neymar Jr", "Al Hilal"),
        player(3, "Nedved", "Juventus"),
        player(4, "Alisson", "Liverpool"),
    ]
}

pub fn test_config() -> Config {
    Config {
        search_url: "http://127.0.0.1:9".to_string(),
        debounce_ms: 300,
        min_query_len: 3,
        request_timeout_secs: 5,
    }
}

/// In-memory search service that records every request it receives.
pub struct MockSearch {
    players: Vec<PlayerRecord>,
    delays: HashMap<String, Duration>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self {
            players,
            delays: HashMap::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PlayerSearch for MockSearch {
    async fn search(&self, name: &str) -> LineupResult<Vec<PlayerRecord>> {
        self.calls.lock().unwrap().push(name.to_string());

        let delay = self.delays.get(name).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;

        if self.fail {
            return Err(LineupError::Status {
                status: 500,
                body: "upstream down".to_string(),
            });
        }
        let needle = name.to_lowercase();
        Ok(self
            .players
            .iter()
            .filter(|p| p.short_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
