use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamedb_probe::probe::{DEFAULT_GAME_LIMIT, DEFAULT_TEAM_COLUMNS, DEFAULT_TEAM_GAMES};
use gamedb_probe::settings::DEFAULT_SETTINGS_FILE;
use gamedb_probe::{ProbeOptions, RunConfig, run_and_report};

/// Print the most recent games and their teams from the game database.
#[derive(Parser, Debug)]
#[command(name = "gamedb-probe", version, about)]
struct Cli {
    /// Settings file with VITE_SUPABASE_URL and VITE_SUPABASE_ANON_KEY
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    env_file: PathBuf,

    /// Number of recent games to fetch
    #[arg(long, default_value_t = DEFAULT_GAME_LIMIT)]
    limit: usize,

    /// Number of leading games to fetch teams for
    #[arg(long, default_value_t = DEFAULT_TEAM_GAMES)]
    team_games: usize,

    /// Columns to select from the teams table
    #[arg(long, default_value = DEFAULT_TEAM_COLUMNS)]
    team_columns: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            settings_path: cli.env_file,
            timeout: Duration::from_secs(cli.timeout),
            probe: ProbeOptions {
                game_limit: cli.limit,
                team_games: cli.team_games,
                team_columns: cli.team_columns,
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamedb_probe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = RunConfig::from(Cli::parse());
    let mut stdout = io::stdout().lock();
    ExitCode::from(run_and_report(&config, &mut stdout).await)
}
