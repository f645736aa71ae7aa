use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{PipelineError, Result};
use crate::http_client::{body_snippet, http_client};
use crate::leaderboard::Category;

const ODDS_URL: &str = "https://api.the-odds-api.com/v4/sports/baseball_mlb/odds";

/// Sentinel rendered when no quote matched or the feed was unavailable.
pub const NO_QUOTE: &str = "-";

/// One quotable outcome, flattened out of the provider's
/// event > bookmaker > market nesting. Feed order is preserved.
#[derive(Debug, Clone)]
pub struct MarketQuote {
    pub outcome: String,
    pub line: f64,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
struct OddsEvent {
    #[serde(default)]
    bookmakers: Vec<OddsBookmaker>,
}

#[derive(Debug, Deserialize)]
struct OddsBookmaker {
    #[serde(default)]
    markets: Vec<OddsMarket>,
}

#[derive(Debug, Deserialize)]
struct OddsMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<OddsOutcome>,
}

#[derive(Debug, Deserialize)]
struct OddsOutcome {
    name: String,
    #[serde(rename = "point")]
    line: Option<f64>,
    price: f64,
}

/// Upstream market key for a category's props, None when the category has no
/// odds market.
pub fn market_key_for(category: Category) -> Option<&'static str> {
    match category {
        Category::Sluggers => Some("batter_home_runs"),
        Category::Obp => Some("batter_total_bases"),
        Category::Strikeouts => Some("pitcher_strikeouts"),
        Category::HrAllowed => None,
    }
}

/// Fetch the full current feed for one market key. Called once per request;
/// every player match afterwards scans the returned list in memory. Errors
/// here degrade to an empty feed at the pipeline, never abort the request.
pub fn fetch_odds_feed(cfg: &AppConfig, market_key: &str) -> Result<Vec<MarketQuote>> {
    let Some(api_key) = cfg.odds_api_key.as_ref() else {
        return Err(PipelineError::upstream("odds", "ODDS_API_KEY missing"));
    };

    let client = http_client().map_err(|e| PipelineError::upstream("odds", e.to_string()))?;
    let resp = client
        .get(ODDS_URL)
        .query(&[
            ("apiKey", api_key.as_str()),
            ("regions", cfg.odds_regions.as_str()),
            ("markets", market_key),
            ("oddsFormat", "decimal"),
            ("dateFormat", "iso"),
        ])
        .send()
        .map_err(|e| PipelineError::upstream("odds", e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| PipelineError::upstream("odds", e.to_string()))?;
    if !status.is_success() {
        return Err(PipelineError::upstream(
            "odds",
            format!("http {}: {}", status, body_snippet(&body)),
        ));
    }

    parse_odds_json(&body, market_key)
}

/// Flatten the provider payload, keeping only markets with `market_key` and
/// outcomes that carry a line. Bookmaker and outcome order is kept as-is.
pub fn parse_odds_json(raw: &str, market_key: &str) -> Result<Vec<MarketQuote>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let events: Vec<OddsEvent> = serde_json::from_str(trimmed)
        .map_err(|e| PipelineError::upstream("odds", format!("invalid json: {e}")))?;

    let mut quotes = Vec::new();
    for event in events {
        for bookmaker in event.bookmakers {
            for market in bookmaker.markets {
                if !market.key.eq_ignore_ascii_case(market_key) {
                    continue;
                }
                for outcome in market.outcomes {
                    let Some(line) = outcome.line else {
                        continue;
                    };
                    quotes.push(MarketQuote {
                        outcome: outcome.name,
                        line,
                        price: outcome.price,
                    });
                }
            }
        }
    }
    Ok(quotes)
}

/// First quote whose outcome name contains the player's name, case
/// insensitively. Purely textual; a name that is a substring of another
/// player's can mismatch, which is accepted here. No best-price selection.
pub fn match_quote<'a>(quotes: &'a [MarketQuote], player_name: &str) -> Option<&'a MarketQuote> {
    let needle = player_name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    quotes
        .iter()
        .find(|quote| quote.outcome.to_lowercase().contains(&needle))
}

/// Render a quote as `O<line> <price>`. Integral values print bare (O7, not
/// O7.0).
pub fn format_quote(quote: &MarketQuote) -> String {
    format!("O{} {}", quote.line, quote.price)
}

#[cfg(test)]
mod tests {
    use super::{MarketQuote, NO_QUOTE, format_quote, match_quote, parse_odds_json};

    fn quote(outcome: &str, line: f64, price: f64) -> MarketQuote {
        MarketQuote {
            outcome: outcome.to_string(),
            line,
            price,
        }
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let feed = vec![quote("AARON JUDGE Over", 1.5, 1.83)];
        let hit = match_quote(&feed, "aaron judge").expect("match");
        assert_eq!(hit.price, 1.83);
    }

    #[test]
    fn first_match_wins_in_feed_order() {
        let feed = vec![
            quote("Luis Garcia Over", 0.5, 2.40),
            quote("Luis Garcia Over", 0.5, 2.10),
        ];
        let hit = match_quote(&feed, "Luis Garcia").expect("match");
        assert_eq!(hit.price, 2.40);
    }

    #[test]
    fn empty_feed_matches_nothing() {
        assert!(match_quote(&[], "Aaron Judge").is_none());
    }

    #[test]
    fn blank_player_name_matches_nothing() {
        let feed = vec![quote("Anyone Over", 0.5, 1.90)];
        assert!(match_quote(&feed, "  ").is_none());
    }

    #[test]
    fn quote_renders_with_over_prefix() {
        assert_eq!(format_quote(&quote("x", 1.5, 1.83)), "O1.5 1.83");
        assert_eq!(format_quote(&quote("x", 7.0, 2.1)), "O7 2.1");
    }

    #[test]
    fn sentinel_is_a_single_dash() {
        assert_eq!(NO_QUOTE, "-");
    }

    #[test]
    fn parse_keeps_only_requested_market() {
        let body = r#"[
            {"bookmakers": [{"markets": [
                {"key": "h2h", "outcomes": [{"name": "Cubs", "price": 1.9}]},
                {"key": "batter_home_runs", "outcomes": [
                    {"name": "Seiya Suzuki Over", "point": 0.5, "price": 3.2}
                ]}
            ]}]}
        ]"#;
        let quotes = parse_odds_json(body, "batter_home_runs").expect("parses");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].outcome, "Seiya Suzuki Over");
        assert_eq!(quotes[0].line, 0.5);
    }

    #[test]
    fn outcomes_without_a_line_are_dropped() {
        let body = r#"[
            {"bookmakers": [{"markets": [
                {"key": "pitcher_strikeouts", "outcomes": [
                    {"name": "No Line Pitcher Over", "price": 1.8},
                    {"name": "Lined Pitcher Over", "point": 5.5, "price": 1.95}
                ]}
            ]}]}
        ]"#;
        let quotes = parse_odds_json(body, "pitcher_strikeouts").expect("parses");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].outcome, "Lined Pitcher Over");
    }

    #[test]
    fn empty_body_parses_to_empty_feed() {
        assert!(parse_odds_json("", "batter_home_runs").expect("parses").is_empty());
        assert!(
            parse_odds_json("null", "batter_home_runs")
                .expect("parses")
                .is_empty()
        );
    }
}
