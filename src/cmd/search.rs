use crate::reports;
use clap::Args;
use lineup::config::Config;
use lineup::error::LineupResult;
use lineup::pitch::query_len;
use lineup::search::SearchClient;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Name fragment to look up
    pub name: String,

    /// Print the raw records as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub config: Config,
}

pub async fn run(args: SearchArgs, config: Config) -> LineupResult<()> {
    if query_len(args.name.trim()) < config.min_query_len {
        warn!("Type at least {} letters", config.min_query_len);
        return Ok(());
    }

    let client = SearchClient::new(&config)?;
    info!("🔎 Searching {:?} at {}", args.name.trim(), client.base_url());
    let players = client.search_players(args.name.trim()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&players)?);
    } else {
        reports::print_search_results(args.name.trim(), &players);
    }
    Ok(())
}
