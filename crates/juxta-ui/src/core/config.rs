//! Page-level settings for the comparison widgets.
//!
//! # Design
//! - Every setting has a default matching the stock templates; attributes only override.
//! - Unparseable overrides are logged and ignored rather than breaking the page.

use std::time::Duration;

use tracing::warn;

/// Default badge pulse duration.
pub const DEFAULT_PULSE: Duration = Duration::from_millis(500);

/// How a toggle reacts when its response arrives after a newer toggle for the same group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Reconcile every response in arrival order.
    #[default]
    ApplyAll,
    /// Only reconcile the response for the latest toggle of each group.
    LatestPerGroup,
}

impl StalePolicy {
    /// Parse the `data-compare-stale-policy` value.
    #[must_use]
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "apply-all" => Some(Self::ApplyAll),
            "latest" | "latest-per-group" => Some(Self::LatestPerGroup),
            _ => None,
        }
    }
}

/// Settings resolved from the page before binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareConfig {
    /// Prefix prepended to `/comparison/update/{action}.json`; empty means same origin.
    pub endpoint_base: String,
    /// How long the badge keeps its highlight after a confirmed toggle.
    pub pulse: Duration,
    /// Handling of out-of-order responses.
    pub stale_policy: StalePolicy,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            endpoint_base: String::new(),
            pulse: DEFAULT_PULSE,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl CompareConfig {
    /// Resolve settings from optional page attributes.
    #[must_use]
    pub fn from_attributes(
        endpoint: Option<&str>,
        pulse_ms: Option<&str>,
        stale_policy: Option<&str>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = endpoint.map(str::trim).filter(|value| !value.is_empty()) {
            config.endpoint_base = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(raw) = pulse_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.pulse = Duration::from_millis(ms),
                Err(_) => warn!(value = raw, "ignoring invalid pulse duration"),
            }
        }
        if let Some(raw) = stale_policy {
            match StalePolicy::from_name(raw) {
                Some(policy) => config.stale_policy = policy,
                None => warn!(value = raw, "ignoring unknown stale policy"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_templates() {
        let config = CompareConfig::from_attributes(None, None, None);
        assert_eq!(config, CompareConfig::default());
        assert_eq!(config.pulse, Duration::from_millis(500));
        assert_eq!(config.stale_policy, StalePolicy::ApplyAll);
        assert!(config.endpoint_base.is_empty());
    }

    #[test]
    fn overrides_are_applied() {
        let config =
            CompareConfig::from_attributes(Some("https://cmp.example/"), Some("250"), Some("latest"));
        assert_eq!(config.endpoint_base, "https://cmp.example");
        assert_eq!(config.pulse, Duration::from_millis(250));
        assert_eq!(config.stale_policy, StalePolicy::LatestPerGroup);
    }

    #[test]
    fn invalid_overrides_fall_back() {
        let config = CompareConfig::from_attributes(Some("  "), Some("soon"), Some("newest"));
        assert_eq!(config, CompareConfig::default());
    }
}
