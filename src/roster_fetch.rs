use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::http_client::{body_snippet, http_client};

const TEAMS_URL: &str = "https://statsapi.mlb.com/api/v1/teams";
const PITCHER_POSITION_CODE: &str = "1";

/// League team directory row, used only to map schedule names to ids.
#[derive(Debug, Clone)]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub is_pitcher: bool,
}

pub fn fetch_team_directory() -> Result<Vec<TeamRef>> {
    let body = get_text(&format!("{TEAMS_URL}?sportId=1"), "team directory")?;
    parse_team_directory_json(&body)
}

pub fn fetch_roster(team_id: u64) -> Result<Vec<Player>> {
    let body = get_text(&format!("{TEAMS_URL}/{team_id}/roster"), "roster")?;
    parse_roster_json(&body)
}

/// Exact, case-sensitive name lookup against the directory. Schedule feeds
/// and the directory drift apart on occasion; a miss means the caller skips
/// that side rather than guessing. This is the single place the matching
/// strategy lives, so it can be swapped without touching the pipeline.
pub fn find_team_id(directory: &[TeamRef], team_name: &str) -> Option<u64> {
    directory
        .iter()
        .find(|team| team.name == team_name)
        .map(|team| team.id)
}

fn get_text(url: &str, service: &'static str) -> Result<String> {
    let client = http_client().map_err(|e| PipelineError::upstream(service, e.to_string()))?;
    let resp = client
        .get(url)
        .send()
        .map_err(|e| PipelineError::upstream(service, e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| PipelineError::upstream(service, e.to_string()))?;
    if !status.is_success() {
        return Err(PipelineError::upstream(
            service,
            format!("http {}: {}", status, body_snippet(&body)),
        ));
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RosterResponse {
    #[serde(default)]
    roster: Vec<RosterSlot>,
}

#[derive(Debug, Deserialize)]
struct RosterSlot {
    person: RosterPerson,
    position: RosterPosition,
}

#[derive(Debug, Deserialize)]
struct RosterPerson {
    id: u64,
    #[serde(rename = "fullName")]
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct RosterPosition {
    #[serde(default)]
    code: String,
}

pub fn parse_team_directory_json(raw: &str) -> Result<Vec<TeamRef>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: TeamsResponse = serde_json::from_str(trimmed)
        .map_err(|e| PipelineError::upstream("team directory", format!("invalid json: {e}")))?;
    Ok(parsed
        .teams
        .into_iter()
        .map(|t| TeamRef {
            id: t.id,
            name: t.name,
        })
        .collect())
}

pub fn parse_roster_json(raw: &str) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: RosterResponse = serde_json::from_str(trimmed)
        .map_err(|e| PipelineError::upstream("roster", format!("invalid json: {e}")))?;
    Ok(parsed
        .roster
        .into_iter()
        .map(|slot| Player {
            id: slot.person.id,
            name: slot.person.full_name,
            is_pitcher: slot.position.code == PITCHER_POSITION_CODE,
        })
        .collect())
}
