use std::env;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

const DEFAULT_ODDS_REGIONS: &str = "us";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Process configuration, read once at startup and passed by reference into
/// every pipeline call. Nothing here is consulted implicitly by the core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Odds provider key. Absent key means odds lookups degrade to "-"
    /// without any provider call.
    pub odds_api_key: Option<String>,
    pub odds_regions: String,
    /// Season override for stat lookups. Defaults to the reference date's
    /// calendar year when unset.
    pub season: Option<u16>,
    pub listen_addr: String,
    pub snapshot_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let odds_api_key = env::var("ODDS_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let odds_regions = env::var("ODDS_REGIONS")
            .unwrap_or_else(|_| DEFAULT_ODDS_REGIONS.to_string())
            .trim()
            .to_ascii_lowercase();
        let season = env::var("MLB_SEASON")
            .ok()
            .and_then(|v| v.trim().parse::<u16>().ok());
        let listen_addr = env::var("LISTEN_ADDR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let snapshot_dir = env::var("SNAPSHOT_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_DIR));

        Self {
            odds_api_key,
            odds_regions,
            season,
            listen_addr,
            snapshot_dir,
        }
    }

    /// Season used for stat lookups against `date`.
    pub fn season_for(&self, date: NaiveDate) -> u16 {
        self.season.unwrap_or(date.year() as u16)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::AppConfig;

    fn bare_config() -> AppConfig {
        AppConfig {
            odds_api_key: None,
            odds_regions: "us".to_string(),
            season: None,
            listen_addr: "0.0.0.0:5000".to_string(),
            snapshot_dir: "snapshots".into(),
        }
    }

    #[test]
    fn season_defaults_to_reference_year() {
        let cfg = bare_config();
        let date = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        assert_eq!(cfg.season_for(date), 2025);
    }

    #[test]
    fn season_override_wins() {
        let cfg = AppConfig {
            season: Some(2024),
            ..bare_config()
        };
        let date = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        assert_eq!(cfg.season_for(date), 2024);
    }
}
