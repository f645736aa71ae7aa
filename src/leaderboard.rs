use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::config::AppConfig;
use crate::error::{PipelineError, Result};
use crate::odds_fetch::{self, MarketQuote, NO_QUOTE};
use crate::report_time::now_report_time;
use crate::roster_fetch::{self, Player, TeamRef};
use crate::schedule_fetch::{self, Game};
use crate::stats_fetch;

pub const DEFAULT_LIMIT: usize = 10;

/// Rendered in place of a statistic the pipeline does not resolve.
pub const STAT_PLACEHOLDER: &str = "TBD";

const BATTING_NOTE: &str = "Expected to play";
const PITCHING_NOTE: &str = "Probable starter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sluggers,
    Obp,
    Strikeouts,
    HrAllowed,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sluggers => "sluggers",
            Category::Obp => "obp",
            Category::Strikeouts => "strikeouts",
            Category::HrAllowed => "hr_allowed",
        }
    }

    /// Season stat key resolved for batting categories. Pitching entries
    /// carry no statistic, and hr_allowed produces no entries at all.
    fn stat_key(self) -> Option<&'static str> {
        match self {
            Category::Sluggers => Some("homeRuns"),
            Category::Obp => Some("onBasePercentage"),
            Category::Strikeouts | Category::HrAllowed => None,
        }
    }
}

impl FromStr for Category {
    type Err = PipelineError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim() {
            "sluggers" => Ok(Category::Sluggers),
            "obp" => Ok(Category::Obp),
            "strikeouts" => Ok(Category::Strikeouts),
            "hr_allowed" => Ok(Category::HrAllowed),
            other => Err(PipelineError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row. Field names on the wire match the snapshot header.
/// Batting rows always carry `Some` stat (zero when unresolved); pitching
/// rows carry `None`, rendered as the placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Stat", serialize_with = "serialize_stat")]
    pub stat: Option<f64>,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "VS")]
    pub vs: String,
    #[serde(rename = "Game Time (CST)")]
    pub game_time: String,
    #[serde(rename = "O/U Odds")]
    pub odds: String,
    #[serde(rename = "Notes")]
    pub note: String,
}

impl LeaderboardEntry {
    pub fn stat_display(&self) -> String {
        match self.stat {
            Some(value) => value.to_string(),
            None => STAT_PLACEHOLDER.to_string(),
        }
    }
}

fn serialize_stat<S>(stat: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match stat {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str(STAT_PLACEHOLDER),
    }
}

/// Filename key for persisting one leaderboard, e.g. `obp_2025-08-20`.
pub fn snapshot_key(category: Category, date: NaiveDate) -> String {
    format!("{category}_{date}")
}

/// Build the ranked, capped leaderboard for one category and reference date.
///
/// Schedule, directory, and roster failures abort the request; odds and
/// per-player stat failures degrade to the documented defaults. `hr_allowed`
/// is answered before any upstream call.
pub fn build_leaderboard(
    cfg: &AppConfig,
    category: Category,
    date: NaiveDate,
    limit: usize,
) -> Result<Vec<LeaderboardEntry>> {
    if category == Category::HrAllowed {
        return Ok(Vec::new());
    }

    let games = upcoming_games(schedule_fetch::games_for_date(date)?, now_report_time());
    if games.is_empty() {
        return Ok(Vec::new());
    }

    let quotes = load_quotes(cfg, category);

    if category == Category::Strikeouts {
        return Ok(compute_pitching_leaderboard(&games, &quotes, date));
    }
    batting_leaderboard(cfg, category, date, limit, &games, &quotes)
}

/// Games whose start is at or after the cutoff. A game already underway is
/// excluded even if still in progress.
pub fn upcoming_games(games: Vec<Game>, cutoff: NaiveDateTime) -> Vec<Game> {
    games
        .into_iter()
        .filter(|game| game.start_report >= cutoff)
        .collect()
}

/// Single odds fetch per request. Any failure leaves the feed empty so every
/// quote falls back to the sentinel.
fn load_quotes(cfg: &AppConfig, category: Category) -> Vec<MarketQuote> {
    let Some(market_key) = odds_fetch::market_key_for(category) else {
        return Vec::new();
    };
    match odds_fetch::fetch_odds_feed(cfg, market_key) {
        Ok(quotes) => quotes,
        Err(e) => {
            warn!("odds feed unavailable, quotes fall back to {NO_QUOTE}: {e}");
            Vec::new()
        }
    }
}

/// Fetch phase for batting categories: resolve each side's roster once per
/// team and every eligible player's stat once per player, then hand the
/// prefetched data to the pure assembly step.
fn batting_leaderboard(
    cfg: &AppConfig,
    category: Category,
    date: NaiveDate,
    limit: usize,
    games: &[Game],
    quotes: &[MarketQuote],
) -> Result<Vec<LeaderboardEntry>> {
    let Some(stat_key) = category.stat_key() else {
        return Ok(Vec::new());
    };
    let season = cfg.season_for(date);
    let directory = roster_fetch::fetch_team_directory()?;

    let mut rosters: HashMap<u64, Vec<Player>> = HashMap::new();
    let mut stats: HashMap<u64, Option<f64>> = HashMap::new();
    for game in games {
        for team in [&game.home, &game.away] {
            let Some(team_id) = roster_fetch::find_team_id(&directory, team) else {
                warn!("team {team:?} not in directory, side skipped");
                continue;
            };
            if rosters.contains_key(&team_id) {
                continue;
            }
            let roster = roster_fetch::fetch_roster(team_id)?;
            for player in roster.iter().filter(|p| !p.is_pitcher) {
                let stat = match stats_fetch::season_stat(player.id, stat_key, season) {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("stat lookup failed for {}: {e}", player.name);
                        None
                    }
                };
                stats.insert(player.id, stat);
            }
            rosters.insert(team_id, roster);
        }
    }

    Ok(compute_batting_leaderboard(
        games, &directory, &rosters, &stats, quotes, date, limit,
    ))
}

/// Assemble, rank, and cap batting entries from prefetched data. Unresolved
/// stats become a literal 0.0 and unmatched quotes the sentinel here, at the
/// output boundary; everything upstream keeps them optional.
pub fn compute_batting_leaderboard(
    games: &[Game],
    directory: &[TeamRef],
    rosters: &HashMap<u64, Vec<Player>>,
    stats: &HashMap<u64, Option<f64>>,
    quotes: &[MarketQuote],
    date: NaiveDate,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let day = date.to_string();
    let mut entries = Vec::new();

    for game in games {
        let game_time = game.start_report.format("%H:%M").to_string();
        for (team, vs) in [(&game.home, &game.away), (&game.away, &game.home)] {
            let Some(team_id) = roster_fetch::find_team_id(directory, team) else {
                continue;
            };
            let Some(roster) = rosters.get(&team_id) else {
                continue;
            };
            for player in roster.iter().filter(|p| !p.is_pitcher) {
                let stat = stats.get(&player.id).copied().flatten();
                let quote =
                    odds_fetch::match_quote(quotes, &player.name).map(odds_fetch::format_quote);
                entries.push(LeaderboardEntry {
                    name: player.name.clone(),
                    team: team.clone(),
                    stat: Some(stat.unwrap_or(0.0)),
                    day: day.clone(),
                    vs: vs.clone(),
                    game_time: game_time.clone(),
                    odds: quote.unwrap_or_else(|| NO_QUOTE.to_string()),
                    note: BATTING_NOTE.to_string(),
                });
            }
        }
    }

    rank_batting(&mut entries);
    entries.truncate(limit);
    entries
}

/// Pitching entries come straight from probable-starter metadata, in
/// schedule order, home side first. No ranking, no cap, no stat.
pub fn compute_pitching_leaderboard(
    games: &[Game],
    quotes: &[MarketQuote],
    date: NaiveDate,
) -> Vec<LeaderboardEntry> {
    let day = date.to_string();
    let mut entries = Vec::new();

    for game in games {
        let game_time = game.start_report.format("%H:%M").to_string();
        for (starter, team, vs) in [
            (&game.home_probable, &game.home, &game.away),
            (&game.away_probable, &game.away, &game.home),
        ] {
            if !has_probable_starter(starter) {
                continue;
            }
            let quote = odds_fetch::match_quote(quotes, starter).map(odds_fetch::format_quote);
            entries.push(LeaderboardEntry {
                name: starter.clone(),
                team: team.clone(),
                stat: None,
                day: day.clone(),
                vs: vs.clone(),
                game_time: game_time.clone(),
                odds: quote.unwrap_or_else(|| NO_QUOTE.to_string()),
                note: PITCHING_NOTE.to_string(),
            });
        }
    }

    entries
}

/// Empty or placeholder names mean the schedule has not named a starter yet.
pub fn has_probable_starter(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(STAT_PLACEHOLDER)
}

/// Descending by stat value; the sort is stable, so ties keep upstream
/// discovery order.
pub fn rank_batting(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        let a_val = a.stat.unwrap_or(0.0);
        let b_val = b.stat.unwrap_or(0.0);
        b_val.partial_cmp(&a_val).unwrap_or(Ordering::Equal)
    });
}
