use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failure classes for one aggregation pass.
///
/// `MalformedTimestamp` and `Upstream` abort the request; degraded lookups
/// (odds feed, per-player stats) never reach this type and fall back to the
/// documented defaults instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed timestamp `{raw}`: {detail}")]
    MalformedTimestamp { raw: String, detail: String },

    #[error("{service} unavailable: {detail}")]
    Upstream { service: &'static str, detail: String },

    #[error("unknown category `{0}`, expected sluggers, strikeouts, obp, or hr_allowed")]
    UnknownCategory(String),
}

impl PipelineError {
    pub fn upstream(service: &'static str, detail: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            detail: detail.into(),
        }
    }
}
