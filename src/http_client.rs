use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const APP_USER_AGENT: &str = "slateboard/0.1";

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. Every upstream call inherits its timeout, so no
/// single slow provider can stall a request indefinitely.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(APP_USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}

/// Collapse a response body into a single short line for error messages.
pub fn body_snippet(body: &str) -> String {
    body.trim()
        .replace('\n', " ")
        .replace('\r', " ")
        .chars()
        .take(220)
        .collect()
}
