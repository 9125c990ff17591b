use crate::reports;
use clap::Args;
use lineup::catalog::SquadSize;
use lineup::config::Config;
use lineup::error::{LineupError, LineupResult};
use lineup::lineup::{DisplayToggle, LineupBuilder, LineupCommand, SlotRef};
use lineup::pitch::SearchHint;
use lineup::render::{render_svg, RenderOptions};
use lineup::search::SearchClient;
use lineup::session::LineupSession;
use lineup::snapshot::{atomic_write, LineupSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Start from a saved lineup instead of the default 11-a-side 4-4-1-1
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(short, long)]
    pub size: Option<SquadSize>,

    #[arg(short, long)]
    pub formation: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    /// "None", "Player N" or N
    #[arg(long)]
    pub captain: Option<SlotRef>,

    /// "None", "Player N" or N
    #[arg(long)]
    pub motm: Option<SlotRef>,

    #[arg(long, default_value_t = false)]
    pub flip: bool,

    #[arg(long, default_value_t = false)]
    pub hide_formation: bool,

    #[arg(long, default_value_t = false)]
    pub club_badge: bool,

    #[arg(long, default_value_t = false)]
    pub manager: bool,

    /// Bind the first search hit to a slot, e.g. `--bind 11=neymar`
    #[arg(short, long)]
    pub bind: Vec<String>,

    /// Also save the finished lineup as JSON
    #[arg(long)]
    pub save: Option<PathBuf>,

    #[arg(short, long, default_value = "lineup.svg")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 600.0)]
    pub width: f32,

    #[command(flatten)]
    pub config: Config,
}

/// Parses `N=query` where N is a 1-based slot reference.
pub fn parse_bind(arg: &str) -> LineupResult<(usize, String)> {
    let (slot, query) = arg
        .split_once('=')
        .ok_or_else(|| LineupError::SlotRef(arg.to_string()))?;
    let index = slot
        .parse::<SlotRef>()?
        .0
        .ok_or_else(|| LineupError::SlotRef(arg.to_string()))?;
    Ok((index, query.trim().to_string()))
}

fn layout_commands(args: &RenderArgs) -> Vec<LineupCommand> {
    let mut commands = Vec::new();
    if let Some(size) = args.size {
        commands.push(LineupCommand::SetSquadSize(size));
    }
    if let Some(name) = &args.formation {
        commands.push(LineupCommand::SelectFormation(name.clone()));
    }
    if args.flip {
        commands.push(LineupCommand::SetDisplay(DisplayToggle::Flip, true));
    }
    commands
}

fn header_commands(args: &RenderArgs) -> Vec<LineupCommand> {
    let mut commands = Vec::new();
    if let Some(title) = &args.title {
        commands.push(LineupCommand::SetTitle(title.clone()));
    }
    if let Some(subtitle) = &args.subtitle {
        commands.push(LineupCommand::SetSubtitle(subtitle.clone()));
    }
    if let Some(captain) = args.captain {
        commands.push(LineupCommand::SetCaptain(captain));
    }
    if let Some(motm) = args.motm {
        commands.push(LineupCommand::SetManOfTheMatch(motm));
    }
    if args.hide_formation {
        commands.push(LineupCommand::SetDisplay(DisplayToggle::FormationLabel, false));
    }
    if args.club_badge {
        commands.push(LineupCommand::SetDisplay(DisplayToggle::ClubBadge, true));
    }
    if args.manager {
        commands.push(LineupCommand::SetDisplay(DisplayToggle::Manager, true));
    }
    commands
}

async fn bind_players(
    lineup: LineupBuilder,
    binds: &[(usize, String)],
    config: &Config,
) -> LineupResult<LineupBuilder> {
    let client = Arc::new(SearchClient::new(config)?);
    let mut session = LineupSession::new(lineup, client, config);

    for (index, query) in binds {
        session.dispatch(LineupCommand::OpenEditor(*index))?;
        session.dispatch(LineupCommand::QueryChanged(query.clone()))?;

        while matches!(
            session.lineup().editor().search_hint(),
            Some(SearchHint::Waiting | SearchHint::Loading)
        ) {
            session.next_search_event().await;
        }

        match session.lineup().editor().search_hint() {
            Some(SearchHint::Results(n)) => {
                session.dispatch(LineupCommand::SelectResult(0))?;
                info!("✅ Slot {}: {:?} matched {} players", index + 1, query, n);
            }
            Some(SearchHint::TypeMore) => {
                warn!("Slot {}: {:?} is too short to search", index + 1, query);
            }
            _ => warn!("Slot {}: no players found for {:?}", index + 1, query),
        }
        session.dispatch(LineupCommand::CloseEditor)?;
    }

    Ok(session.into_lineup())
}

pub async fn run(args: RenderArgs, config: Config) -> LineupResult<()> {
    let binds = args
        .bind
        .iter()
        .map(|b| parse_bind(b))
        .collect::<LineupResult<Vec<_>>>()?;

    let mut lineup = match &args.input {
        Some(path) => {
            info!("📂 Loading lineup: {}", path.display());
            LineupSnapshot::load_from_file(path)?.restore(config.min_query_len)?
        }
        None => LineupBuilder::new(config.min_query_len),
    };

    for command in layout_commands(&args) {
        lineup.apply(command)?;
    }
    if !binds.is_empty() {
        lineup = bind_players(lineup, &binds, &config).await?;
    }
    for command in header_commands(&args) {
        lineup.apply(command)?;
    }

    reports::print_slots(&lineup);

    let svg = render_svg(&lineup, &RenderOptions { width: args.width });
    atomic_write(&args.out, svg)?;
    info!("🖼️  Lineup graphic written to {}", args.out.display());

    if let Some(path) = &args.save {
        LineupSnapshot::capture(&lineup).save_to_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind() {
        assert_eq!(parse_bind("11= neymar ").unwrap(), (10, "neymar".to_string()));
        assert_eq!(parse_bind("Player 1=alisson").unwrap(), (0, "alisson".to_string()));
        assert!(parse_bind("neymar").is_err());
        assert!(parse_bind("None=neymar").is_err());
        assert!(parse_bind("0=neymar").is_err());
    }
}
