use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use lineup::config::Config;
use lineup::error::LineupResult;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; explicit flags still win over its values
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the formation catalog
    Formations(cmd::formations::FormationsArgs),
    /// Look players up by name
    Search(cmd::search::SearchArgs),
    /// Build a lineup and write it as an SVG graphic
    Render(cmd::render::RenderArgs),
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// File values first, then anything set on the command line or via env.
fn resolve_config(
    path: Option<&str>,
    cli_config: &Config,
    sub_matches: Option<&ArgMatches>,
) -> LineupResult<Config> {
    let config = match (path, sub_matches) {
        (Some(path), Some(matches)) => {
            info!("📂 Loading config: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, matches);
            config
        }
        _ => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Formations(args) => {
            cmd::formations::run(args);
            Ok(())
        }
        Commands::Search(args) => {
            match resolve_config(
                cli.config_file.as_deref(),
                &args.config,
                matches.subcommand_matches("search"),
            ) {
                Ok(config) => cmd::search::run(args, config).await,
                Err(e) => Err(e),
            }
        }
        Commands::Render(args) => {
            match resolve_config(
                cli.config_file.as_deref(),
                &args.config,
                matches.subcommand_matches("render"),
            ) {
                Ok(config) => cmd::render::run(args, config).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
