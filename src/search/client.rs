use super::PlayerSearch;
use crate::config::Config;
use crate::error::{LineupError, LineupResult};
use lineup_protocol::{PlayerRecord, SearchResponse};
use reqwest::Client;
use tracing::debug;

/// HTTP client for the player search service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(config: &Config) -> LineupResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.search_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET <base>/player?name=<name>`. A body without `players` is an empty
    /// result; any non-success status is an error.
    pub async fn search_players(&self, name: &str) -> LineupResult<Vec<PlayerRecord>> {
        let url = format!("{}/player", self.base_url);
        debug!("Searching players: {} name={:?}", url, name);

        let response = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LineupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!("Search for {:?} returned {} players", name, body.players.len());
        Ok(body.players)
    }
}

impl PlayerSearch for SearchClient {
    async fn search(&self, name: &str) -> LineupResult<Vec<PlayerRecord>> {
        self.search_players(name).await
    }
}
