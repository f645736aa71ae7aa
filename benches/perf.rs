use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use slateboard::leaderboard::{LeaderboardEntry, rank_batting};
use slateboard::odds_fetch::{MarketQuote, match_quote, parse_odds_json};

fn synthetic_feed(outcomes: usize) -> Vec<MarketQuote> {
    (0..outcomes)
        .map(|idx| MarketQuote {
            outcome: format!("Synthetic Batter {idx} Over"),
            line: 1.5,
            price: 1.80 + (idx % 40) as f64 * 0.01,
        })
        .collect()
}

fn synthetic_entries(count: usize) -> Vec<LeaderboardEntry> {
    (0..count)
        .map(|idx| LeaderboardEntry {
            name: format!("Synthetic Batter {idx}"),
            team: "Chicago Cubs".to_string(),
            stat: Some(0.200 + (idx % 97) as f64 * 0.002),
            day: "2025-08-20".to_string(),
            vs: "St. Louis Cardinals".to_string(),
            game_time: "18:05".to_string(),
            odds: "-".to_string(),
            note: "Expected to play".to_string(),
        })
        .collect()
}

fn bench_odds_parse(c: &mut Criterion) {
    c.bench_function("odds_parse", |b| {
        b.iter(|| {
            let quotes = parse_odds_json(black_box(ODDS_JSON), "batter_total_bases").unwrap();
            black_box(quotes.len());
        })
    });
}

fn bench_quote_scan(c: &mut Criterion) {
    // A full slate is roughly 15 games * 2 sides * a dozen quoted batters
    // across several bookmakers.
    let feed = synthetic_feed(1_000);

    c.bench_function("quote_scan_hit", |b| {
        b.iter(|| {
            let hit = match_quote(black_box(&feed), black_box("Synthetic Batter 742"));
            black_box(hit.is_some());
        })
    });

    c.bench_function("quote_scan_miss", |b| {
        b.iter(|| {
            let hit = match_quote(black_box(&feed), black_box("Unquoted Batter"));
            black_box(hit.is_some());
        })
    });
}

fn bench_rank_and_cap(c: &mut Criterion) {
    let entries = synthetic_entries(400);

    c.bench_function("rank_and_cap", |b| {
        b.iter(|| {
            let mut rows = entries.clone();
            rank_batting(&mut rows);
            rows.truncate(10);
            black_box(rows.len());
        })
    });
}

criterion_group!(perf, bench_odds_parse, bench_quote_scan, bench_rank_and_cap);
criterion_main!(perf);

static ODDS_JSON: &str = include_str!("../tests/fixtures/odds.json");
