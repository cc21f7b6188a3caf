//! Detection of legacy-style configuration keys.

use std::collections::BTreeSet;

/// Marker substrings identifying legacy configuration keys.
pub const DEFAULT_MARKERS: [&str; 6] = [
    "remote.connection",
    "remote.cluster",
    "endpoint.name",
    "deployment.node.selector",
    "invocation.timeout",
    "reconnect.tasks.timeout",
];

/// Immutable set of legacy key markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyKeySet {
    markers: BTreeSet<String>,
}

impl LegacyKeySet {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    /// True if `key` contains any marker as a substring.
    pub fn matches(&self, key: &str) -> bool {
        self.markers.iter().any(|marker| key.contains(marker.as_str()))
    }
}

impl Default for LegacyKeySet {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}

/// True if at least one of `keys` contains a legacy marker.
///
/// Callers use this to warn about mixed legacy and native configuration;
/// the policy itself is theirs.
pub fn contains_legacy_markers<I, K>(keys: I, key_set: &LegacyKeySet) -> bool
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    keys.into_iter().any(|key| key_set.matches(key.as_ref()))
}
