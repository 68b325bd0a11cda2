//! Client configuration: defaults, overridden by environment.

use std::time::Duration;

/// Hosted backend.
pub const DEFAULT_API_URL: &str = "https://manager-pro-api.onrender.com/api";

/// How long a fetched list is served from the cache before re-fetching.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(60 * 60);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub stale_time: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            stale_time: DEFAULT_STALE_TIME,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `STOCKLEDGER_API_URL`, `STOCKLEDGER_TIMEOUT_SECS`
    /// and `STOCKLEDGER_STALE_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("STOCKLEDGER_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(secs) = seconds(&lookup, "STOCKLEDGER_TIMEOUT_SECS") {
            config.timeout = secs;
        }
        if let Some(secs) = seconds(&lookup, "STOCKLEDGER_STALE_SECS") {
            config.stale_time = secs;
        }

        config
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring non-numeric duration");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.stale_time, Duration::from_secs(3600));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("STOCKLEDGER_API_URL", " http://localhost:4000/api "),
            ("STOCKLEDGER_TIMEOUT_SECS", "5"),
            ("STOCKLEDGER_STALE_SECS", "0"),
        ]));
        assert_eq!(config.api_url, "http://localhost:4000/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.stale_time, Duration::ZERO);
    }

    #[test]
    fn malformed_durations_are_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("STOCKLEDGER_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
