//! Execution profile detection
//!
//! Profiles come from the configured list first, then from the first of
//! [`PROFILE_ENV_VARS`] that is set. Values are comma separated.

/// Environment variables consulted after the configured list, in order.
/// Only the first one that is set contributes.
pub const PROFILE_ENV_VARS: [&str; 2] = ["MOVIECARDS_PROFILES_ACTIVE", "APP_PROFILES_ACTIVE"];

const TEST_MARKER: &str = "test";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveProfiles(Vec<String>);

impl ActiveProfiles {
    pub fn new<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            profiles
                .into_iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Parse a comma separated list such as `"dev, test"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Resolve against the process environment.
    pub fn resolve(configured: &[String]) -> Self {
        Self::resolve_with(configured, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(configured: &[String], lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut profiles = Self::new(configured);
        if let Some(raw) = PROFILE_ENV_VARS.iter().find_map(|name| lookup(name)) {
            profiles.0.extend(Self::parse(&raw).0);
        }
        profiles
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any profile name contains "test" (`test`, `integration-test`, ...).
    pub fn is_test(&self) -> bool {
        self.0.iter().any(|p| p.contains(TEST_MARKER))
    }
}
