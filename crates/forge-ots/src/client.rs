use std::time::Duration;

use reqwest::Client;

use crate::error::OtsError;

/// Default calendar servers, matching the deployed OpenTimestamps pool.
pub const DEFAULT_CALENDARS: &[&str] = &[
    "https://a.pool.opentimestamps.org",
    "https://b.pool.opentimestamps.org",
    "https://a.pool.eternitywall.com",
];

/// Per-calendar request deadline. No retries happen at this layer — a
/// caller that wants another attempt re-invokes `submit_to_ots` or
/// `check_ots_upgrade`.
pub const CALENDAR_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("forge-ots/", env!("CARGO_PKG_VERSION"));

/// A configured HTTP client plus the list of calendars to fan out to.
#[derive(Debug, Clone)]
pub struct OtsClient {
    http: Client,
    calendars: Vec<String>,
}

impl OtsClient {
    /// Build a client against the default calendar pool.
    pub fn new() -> Result<Self, OtsError> {
        Self::with_calendars(DEFAULT_CALENDARS.iter().map(|s| s.to_string()).collect())
    }

    /// Build a client against a caller-supplied calendar list.
    pub fn with_calendars(calendars: Vec<String>) -> Result<Self, OtsError> {
        let http = Client::builder()
            .timeout(CALENDAR_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OtsError::ClientBuild(e.to_string()))?;

        Ok(Self { http, calendars })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn calendars(&self) -> &[String] {
        &self.calendars
    }
}
