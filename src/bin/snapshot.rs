use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use slateboard::config::AppConfig;
use slateboard::leaderboard::{self, Category, DEFAULT_LIMIT};
use slateboard::report_time::now_report_time;
use slateboard::snapshot::write_snapshot;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slateboard=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(category_arg) = args.first() else {
        return Err(anyhow!(
            "usage: snapshot <sluggers|obp|strikeouts|hr_allowed> [YYYY-MM-DD] [limit]"
        ));
    };
    let category: Category = category_arg.parse()?;
    let date = match args.get(1) {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))?,
        None => now_report_time().date(),
    };
    let limit = match args.get(2) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid limit {raw:?}"))?,
        None => DEFAULT_LIMIT,
    };

    let cfg = AppConfig::from_env();
    let entries = leaderboard::build_leaderboard(&cfg, category, date, limit)?;
    let key = leaderboard::snapshot_key(category, date);
    let path = write_snapshot(&cfg.snapshot_dir, &key, &entries)?;

    println!("Snapshot complete");
    println!("Category: {category}");
    println!("Date: {date}");
    println!("Rows: {}", entries.len());
    println!("File: {}", path.display());

    Ok(())
}
