use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of whoever owns a session: a player, a channel, a thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(String);

impl OwnerKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for OwnerKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
