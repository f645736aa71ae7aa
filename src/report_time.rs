use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::{PipelineError, Result};

/// Hours subtracted from UTC to reach the reporting zone. The offset is
/// fixed year-round; no daylight-saving adjustment is ever applied.
const REPORT_OFFSET_HOURS: i64 = 6;

/// Convert an upstream UTC timestamp (ISO-8601, "Z" suffix) to a naive
/// reporting-zone datetime. All time-zone metadata is discarded.
pub fn to_report_time(utc: &str) -> Result<NaiveDateTime> {
    let parsed =
        DateTime::parse_from_rfc3339(utc.trim()).map_err(|e| PipelineError::MalformedTimestamp {
            raw: utc.to_string(),
            detail: e.to_string(),
        })?;
    Ok(parsed.with_timezone(&Utc).naive_utc() - Duration::hours(REPORT_OFFSET_HOURS))
}

/// The current instant expressed in the reporting zone, used as the cutoff
/// when filtering games already underway.
pub fn now_report_time() -> NaiveDateTime {
    Utc::now().naive_utc() - Duration::hours(REPORT_OFFSET_HOURS)
}
