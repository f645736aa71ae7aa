pub mod config;
pub mod error;
pub mod http_client;
pub mod leaderboard;
pub mod odds_fetch;
pub mod report_time;
pub mod roster_fetch;
pub mod schedule_fetch;
pub mod server;
pub mod snapshot;
pub mod stats_fetch;
