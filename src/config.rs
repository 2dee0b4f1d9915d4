use std::fmt;
use std::time::Duration;

pub const ESIOS_BASE_URL: &str = "https://api.esios.ree.es";
pub const PVPC_INDICATOR_ID: u32 = 1001;

pub const INDICATOR_NAME: &str = "PVPC";
pub const PRICE_UNITS: &str = "€/MWh";

pub const API_KEY_HEADER: &str = "x-api-key";

pub const API_KEY_ENV: &str = "ESIOS_TOKEN";
pub const BASE_URL_ENV: &str = "ESIOS_BASE_URL";
pub const TIMEOUT_ENV: &str = "ESIOS_TIMEOUT_SECS";
pub const SUMMARY_FETCH_ENV: &str = "PVPC_SUMMARY_FETCH";

/// How [`PvpcClient::daily_summary`](crate::PvpcClient::daily_summary)
/// obtains the current-hour price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFetch {
    /// Run a second, independent fetch cycle for the current-hour lookup.
    #[default]
    Independent,
    /// Derive the current-hour price from the same fetch used for the aggregates.
    Shared,
}

impl SummaryFetch {
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "shared" => Self::Shared,
            _ => Self::Independent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Shared => "shared",
        }
    }
}

/// Client configuration. Passed explicitly to [`PvpcClient::new`](crate::PvpcClient::new)
/// or assembled through the builder.
#[derive(Clone)]
pub struct ClientConfig {
    /// Optional ESIOS API key, sent as `x-api-key` on every request.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    pub summary_fetch: SummaryFetch,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: ESIOS_BASE_URL.to_string(),
            timeout: None,
            summary_fetch: SummaryFetch::default(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `ESIOS_TOKEN`, `ESIOS_BASE_URL`,
    /// `ESIOS_TIMEOUT_SECS` and `PVPC_SUMMARY_FETCH`. Unset or unparseable
    /// variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup(API_KEY_ENV).and_then(normalize_api_key);
        let base_url = lookup(BASE_URL_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = lookup(TIMEOUT_ENV)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let summary_fetch = lookup(SUMMARY_FETCH_ENV)
            .map(|s| SummaryFetch::from_str_case_insensitive(&s))
            .unwrap_or_default();

        Self {
            api_key,
            base_url,
            timeout,
            summary_fetch,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Blank keys count as "no key": the upstream only sees a header when
/// there is something to send.
pub(crate) fn normalize_api_key(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("summary_fetch", &self.summary_fetch)
            .finish()
    }
}
