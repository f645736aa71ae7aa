use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::http_client::{body_snippet, http_client};
use crate::report_time::to_report_time;

const SCHEDULE_URL: &str = "https://statsapi.mlb.com/api/v1/schedule";

/// One scheduled game, start time already shifted into the reporting zone.
/// Built once per schedule fetch and never recomputed.
#[derive(Debug, Clone)]
pub struct Game {
    pub game_pk: u64,
    pub home: String,
    pub away: String,
    pub start_report: NaiveDateTime,
    /// Probable starter names, empty string when the schedule has none.
    pub home_probable: String,
    pub away_probable: String,
}

pub fn games_for_date(date: NaiveDate) -> Result<Vec<Game>> {
    let client =
        http_client().map_err(|e| PipelineError::upstream("schedule", e.to_string()))?;
    let date_param = date.to_string();
    let resp = client
        .get(SCHEDULE_URL)
        .query(&[
            ("sportId", "1"),
            ("date", date_param.as_str()),
            ("hydrate", "probablePitcher"),
        ])
        .send()
        .map_err(|e| PipelineError::upstream("schedule", e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| PipelineError::upstream("schedule", e.to_string()))?;
    if !status.is_success() {
        return Err(PipelineError::upstream(
            "schedule",
            format!("http {}: {}", status, body_snippet(&body)),
        ));
    }

    parse_schedule_json(&body, date)
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDate {
    date: String,
    #[serde(default)]
    games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize)]
struct ScheduleGame {
    #[serde(rename = "gamePk")]
    game_pk: u64,
    #[serde(rename = "gameDate")]
    game_date: String,
    teams: ScheduleSides,
}

#[derive(Debug, Deserialize)]
struct ScheduleSides {
    home: ScheduleSide,
    away: ScheduleSide,
}

#[derive(Debug, Deserialize)]
struct ScheduleSide {
    team: ScheduleTeam,
    #[serde(rename = "probablePitcher")]
    probable_pitcher: Option<ProbablePitcher>,
}

#[derive(Debug, Deserialize)]
struct ScheduleTeam {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProbablePitcher {
    #[serde(rename = "fullName", default)]
    full_name: String,
}

/// Parse a schedule payload, keeping only the block for `date`. An empty
/// body or a payload without that date yields an empty vec, not an error.
pub fn parse_schedule_json(raw: &str, date: NaiveDate) -> Result<Vec<Game>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let parsed: ScheduleResponse = serde_json::from_str(trimmed)
        .map_err(|e| PipelineError::upstream("schedule", format!("invalid json: {e}")))?;

    let date_key = date.to_string();
    let Some(day) = parsed.dates.into_iter().find(|d| d.date == date_key) else {
        return Ok(Vec::new());
    };

    let mut games = Vec::with_capacity(day.games.len());
    for game in day.games {
        let start_report = to_report_time(&game.game_date)?;
        games.push(Game {
            game_pk: game.game_pk,
            home: game.teams.home.team.name,
            away: game.teams.away.team.name,
            start_report,
            home_probable: probable_name(game.teams.home.probable_pitcher),
            away_probable: probable_name(game.teams.away.probable_pitcher),
        });
    }
    Ok(games)
}

fn probable_name(pitcher: Option<ProbablePitcher>) -> String {
    pitcher
        .map(|p| p.full_name.trim().to_string())
        .unwrap_or_default()
}
