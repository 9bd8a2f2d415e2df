//! The query sequence: recent games first, then teams for the newest few.

use std::io::Write;

use serde_json::Value;

use crate::error::QueryError;
use crate::rest::{RestClient, Select};
use crate::types::{GAMES_TABLE, Game, TEAMS_TABLE, TeamListing};

pub const DEFAULT_GAME_LIMIT: usize = 3;
pub const DEFAULT_TEAM_GAMES: usize = 2;
pub const DEFAULT_TEAM_COLUMNS: &str = "id,name";

/// How much the probe fetches.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Row limit of the games query.
    pub game_limit: usize,
    /// Number of leading games that get a teams query.
    pub team_games: usize,
    /// `select=` list of the teams query.
    pub team_columns: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            game_limit: DEFAULT_GAME_LIMIT,
            team_games: DEFAULT_TEAM_GAMES,
            team_columns: DEFAULT_TEAM_COLUMNS.to_string(),
        }
    }
}

/// What a completed probe saw.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub games: Vec<Game>,
    pub teams: Vec<TeamListing>,
}

pub struct Probe<'a> {
    client: &'a RestClient,
    options: ProbeOptions,
}

impl<'a> Probe<'a> {
    pub fn new(client: &'a RestClient, options: ProbeOptions) -> Self {
        Self { client, options }
    }

    /// Run the queries in order, writing each line to `out` as soon as it is known.
    ///
    /// The first failure ends the run; whatever was already printed stays printed.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ProbeReport, QueryError> {
        let games = self.fetch_games().await?;
        tracing::info!("Fetched {} game(s)", games.len());

        writeln!(out, "RECENT GAMES:")?;
        for game in &games {
            writeln!(out, "{}", game)?;
        }

        let mut teams = Vec::new();
        for (index, game) in games.iter().take(self.options.team_games).enumerate() {
            let listing = self.fetch_teams(index, game).await?;
            writeln!(out, "{}", listing)?;
            teams.push(listing);
        }

        Ok(ProbeReport { games, teams })
    }

    async fn fetch_games(&self) -> Result<Vec<Game>, QueryError> {
        let query = Select::columns("*")
            .order_desc("created_at")
            .limit(self.options.game_limit);
        self.client.select(GAMES_TABLE, &query).await
    }

    async fn fetch_teams(&self, index: usize, game: &Game) -> Result<TeamListing, QueryError> {
        let game_id = game.filter_id();
        let query = Select::columns(self.options.team_columns.as_str()).eq("game_id", &game_id);
        let teams: Vec<Value> = self.client.select(TEAMS_TABLE, &query).await?;
        tracing::debug!("Game {} has {} team(s)", game_id, teams.len());

        Ok(TeamListing {
            index,
            game_id,
            teams: Value::Array(teams),
        })
    }
}
