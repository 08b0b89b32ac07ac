//! Registry configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_INITIAL_CAPACITY, ENV_FAILURE_POLICY, ENV_INITIAL_CAPACITY, ENV_MAX_SUBSCRIBERS,
};
use crate::error::{HeraldError, Result};

/// What a broadcast does when a subscriber's `receive` fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and keep delivering to the remaining subscribers.
    #[default]
    Continue,
    /// Stop at the first failure; remaining subscribers are not invoked.
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(HeraldError::ConfigError(format!(
                "unknown failure policy '{other}' (expected 'continue' or 'abort')"
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Continue => f.write_str("continue"),
            FailurePolicy::Abort => f.write_str("abort"),
        }
    }
}

/// Registry configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Number of subscriber slots to preallocate
    pub initial_capacity: usize,
    /// Upper bound on simultaneous subscribers (`None` = unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_subscribers: Option<usize>,
    /// Behaviour when a subscriber fails to receive a message
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_subscribers: None,
            failure_policy: FailurePolicy::Continue,
        }
    }
}

impl RegistryConfig {
    /// Reads overrides from the environment.
    ///
    /// Each key falls back to its default on its own when unset or
    /// unparseable; valid overrides for the other keys still apply.
    pub fn from_env() -> Self {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Reads overrides from the environment, rejecting unparseable values.
    pub fn try_from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// `lookup` is queried with the `HERALD_*` keys from [`crate::constants`].
    /// The first unparseable value fails the whole call.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_INITIAL_CAPACITY) {
            config.initial_capacity = parse_usize(ENV_INITIAL_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_SUBSCRIBERS) {
            config.max_subscribers = parse_limit(&raw)?;
        }
        if let Some(raw) = lookup(ENV_FAILURE_POLICY) {
            config.failure_policy = raw.parse()?;
        }

        Ok(config)
    }

    /// Like [`from_lookup`](Self::from_lookup), but an unparseable value
    /// leaves only that key at its default.
    pub fn from_lookup_lenient<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            initial_capacity: lookup(ENV_INITIAL_CAPACITY)
                .and_then(|raw| parse_usize(ENV_INITIAL_CAPACITY, &raw).ok())
                .unwrap_or(defaults.initial_capacity),
            max_subscribers: lookup(ENV_MAX_SUBSCRIBERS)
                .and_then(|raw| parse_limit(&raw).ok())
                .unwrap_or(defaults.max_subscribers),
            failure_policy: lookup(ENV_FAILURE_POLICY)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.failure_policy),
        }
    }

    /// Sets the subscriber limit. `0` means unbounded.
    pub fn with_max_subscribers(mut self, limit: usize) -> Self {
        self.max_subscribers = (limit > 0).then_some(limit);
        self
    }

    /// Returns the effective subscriber limit; `Some(0)` counts as unbounded.
    pub fn subscriber_limit(&self) -> Option<usize> {
        self.max_subscribers.filter(|&limit| limit > 0)
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

fn parse_usize(key: &str, raw: &str) -> Result<usize> {
    raw.trim().parse().map_err(|_| {
        HeraldError::ConfigError(format!(
            "{key}: expected a non-negative integer, got '{raw}'"
        ))
    })
}

/// Empty or `0` means unbounded.
fn parse_limit(raw: &str) -> Result<Option<usize>> {
    match raw.trim() {
        "" | "0" => Ok(None),
        value => parse_usize(ENV_MAX_SUBSCRIBERS, value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use test_case::test_case;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.max_subscribers, None);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn test_empty_lookup_is_default() {
        let config = RegistryConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            (ENV_INITIAL_CAPACITY, "64"),
            (ENV_MAX_SUBSCRIBERS, "100"),
            (ENV_FAILURE_POLICY, "Abort"),
        ]))
        .unwrap();

        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.max_subscribers, Some(100));
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test_case("" ; "empty")]
    #[test_case("0" ; "zero")]
    #[test_case("  " ; "blank")]
    fn test_unbounded_max_subscribers(raw: &str) {
        let config =
            RegistryConfig::from_lookup(lookup_from(&[(ENV_MAX_SUBSCRIBERS, raw)])).unwrap();
        assert_eq!(config.max_subscribers, None);
    }

    #[test_case(ENV_INITIAL_CAPACITY, "lots")]
    #[test_case(ENV_MAX_SUBSCRIBERS, "-1")]
    #[test_case(ENV_FAILURE_POLICY, "retry")]
    fn test_invalid_values_rejected(key: &str, raw: &str) {
        let result = RegistryConfig::from_lookup(lookup_from(&[(key, raw)]));
        assert!(matches!(result, Err(HeraldError::ConfigError(_))));
    }

    #[test_case("continue", FailurePolicy::Continue)]
    #[test_case(" ABORT ", FailurePolicy::Abort)]
    fn test_failure_policy_parse(raw: &str, expected: FailurePolicy) {
        assert_eq!(raw.parse::<FailurePolicy>().unwrap(), expected);
        assert_eq!(expected.to_string().parse::<FailurePolicy>().unwrap(), expected);
    }

    #[test]
    fn test_lenient_lookup_keeps_valid_overrides() {
        let config = RegistryConfig::from_lookup_lenient(lookup_from(&[
            (ENV_INITIAL_CAPACITY, "64"),
            (ENV_MAX_SUBSCRIBERS, "lots"),
            (ENV_FAILURE_POLICY, "abort"),
        ]));

        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.max_subscribers, None);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_lenient_lookup_matches_strict_when_valid() {
        let pairs = [(ENV_INITIAL_CAPACITY, "8"), (ENV_MAX_SUBSCRIBERS, "5")];
        let strict = RegistryConfig::from_lookup(lookup_from(&pairs)).unwrap();
        let lenient = RegistryConfig::from_lookup_lenient(lookup_from(&pairs));
        assert_eq!(strict, lenient);
    }

    // The only test that touches the process environment.
    #[test]
    fn test_from_env_falls_back_per_key() {
        std::env::set_var(ENV_INITIAL_CAPACITY, "64");
        std::env::set_var(ENV_MAX_SUBSCRIBERS, "lots");
        std::env::set_var(ENV_FAILURE_POLICY, "abort");

        let lenient = RegistryConfig::from_env();
        let strict = RegistryConfig::try_from_env();

        for key in [ENV_INITIAL_CAPACITY, ENV_MAX_SUBSCRIBERS, ENV_FAILURE_POLICY] {
            std::env::remove_var(key);
        }

        assert_eq!(lenient.initial_capacity, 64);
        assert_eq!(lenient.max_subscribers, None);
        assert_eq!(lenient.failure_policy, FailurePolicy::Abort);
        assert!(matches!(strict, Err(HeraldError::ConfigError(_))));
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let config = RegistryConfig::default().with_max_subscribers(0);
        assert_eq!(config.max_subscribers, None);

        let deserialized = RegistryConfig {
            max_subscribers: Some(0),
            ..RegistryConfig::default()
        };
        assert_eq!(deserialized.subscriber_limit(), None);
        let bounded = RegistryConfig::default().with_max_subscribers(7);
        assert_eq!(bounded.subscriber_limit(), Some(7));
    }

    #[test]
    fn test_builders() {
        let config = RegistryConfig::default()
            .with_max_subscribers(3)
            .with_failure_policy(FailurePolicy::Abort);
        assert_eq!(config.max_subscribers, Some(3));
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_serde_roundtrip_uses_lowercase_policy() {
        let config = RegistryConfig::default().with_failure_policy(FailurePolicy::Abort);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"abort\""));
        assert!(!json.contains("max_subscribers"));

        let back: RegistryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
