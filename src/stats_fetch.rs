use serde::Deserialize;
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::http_client::{body_snippet, http_client};

const PEOPLE_URL: &str = "https://statsapi.mlb.com/api/v1/people";

/// Resolve one player's season value for `stat_key` from the first split of
/// the first stat group. `Ok(None)` means the provider answered but had no
/// usable value; the caller decides what a missing value renders as.
pub fn season_stat(player_id: u64, stat_key: &str, season: u16) -> Result<Option<f64>> {
    let client =
        http_client().map_err(|e| PipelineError::upstream("player stats", e.to_string()))?;
    let url = format!("{PEOPLE_URL}/{player_id}/stats");
    let season_param = season.to_string();
    let resp = client
        .get(&url)
        .query(&[("stats", "season"), ("season", season_param.as_str())])
        .send()
        .map_err(|e| PipelineError::upstream("player stats", e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| PipelineError::upstream("player stats", e.to_string()))?;
    if !status.is_success() {
        return Err(PipelineError::upstream(
            "player stats",
            format!("http {}: {}", status, body_snippet(&body)),
        ));
    }

    parse_season_stat_json(&body, stat_key)
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

#[derive(Debug, Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<StatSplit>,
}

#[derive(Debug, Deserialize)]
struct StatSplit {
    #[serde(default)]
    stat: Value,
}

pub fn parse_season_stat_json(raw: &str, stat_key: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let parsed: StatsResponse = serde_json::from_str(trimmed)
        .map_err(|e| PipelineError::upstream("player stats", format!("invalid json: {e}")))?;
    let Some(split) = parsed.stats.first().and_then(|group| group.splits.first()) else {
        return Ok(None);
    };
    Ok(split.stat.get(stat_key).and_then(stat_value_to_f64))
}

// Rate stats arrive as strings like ".350", counting stats as numbers.
fn stat_value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{parse_season_stat_json, stat_value_to_f64};

    #[test]
    fn string_rate_stat_parses() {
        assert_eq!(stat_value_to_f64(&json!(".350")), Some(0.35));
        assert_eq!(stat_value_to_f64(&json!("0.412")), Some(0.412));
    }

    #[test]
    fn numeric_counting_stat_parses() {
        assert_eq!(stat_value_to_f64(&json!(27)), Some(27.0));
    }

    #[test]
    fn non_numeric_values_yield_none() {
        assert_eq!(stat_value_to_f64(&json!("-.--")), None);
        assert_eq!(stat_value_to_f64(&json!(null)), None);
        assert_eq!(stat_value_to_f64(&json!({"x": 1})), None);
    }

    #[test]
    fn only_first_split_is_consulted() {
        let body = r#"{"stats":[{"splits":[{"stat":{"homeRuns":3}},{"stat":{"homeRuns":40}}]}]}"#;
        let value = parse_season_stat_json(body, "homeRuns").expect("parses");
        assert_eq!(value, Some(3.0));
    }

    #[test]
    fn missing_split_or_key_is_none_not_error() {
        assert_eq!(
            parse_season_stat_json(r#"{"stats":[]}"#, "homeRuns").expect("parses"),
            None
        );
        assert_eq!(
            parse_season_stat_json(r#"{"stats":[{"splits":[]}]}"#, "homeRuns").expect("parses"),
            None
        );
        assert_eq!(
            parse_season_stat_json(
                r#"{"stats":[{"splits":[{"stat":{"onBasePercentage":".301"}}]}]}"#,
                "homeRuns"
            )
            .expect("parses"),
            None
        );
    }

    #[test]
    fn empty_body_is_none() {
        assert_eq!(parse_season_stat_json("", "homeRuns").expect("parses"), None);
        assert_eq!(
            parse_season_stat_json("null", "homeRuns").expect("parses"),
            None
        );
    }
}
