use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::leaderboard::LeaderboardEntry;

const SNAPSHOT_HEADER: [&str; 8] = [
    "Name",
    "Team",
    "Stat",
    "Day",
    "VS",
    "Game Time (CST)",
    "O/U Odds",
    "Notes",
];

/// Persist one leaderboard as `<dir>/<key>.csv`: header row first, then one
/// row per entry in leaderboard order. Returns the written path.
pub fn write_snapshot(dir: &Path, key: &str, entries: &[LeaderboardEntry]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create snapshot dir {}", dir.display()))?;
    let path = dir.join(format!("{key}.csv"));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    writer
        .write_record(SNAPSHOT_HEADER)
        .context("failed writing snapshot header")?;
    for entry in entries {
        let stat = entry.stat_display();
        writer
            .write_record([
                entry.name.as_str(),
                entry.team.as_str(),
                stat.as_str(),
                entry.day.as_str(),
                entry.vs.as_str(),
                entry.game_time.as_str(),
                entry.odds.as_str(),
                entry.note.as_str(),
            ])
            .context("failed writing snapshot row")?;
    }
    writer.flush().context("failed flushing snapshot")?;
    Ok(path)
}
