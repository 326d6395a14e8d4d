//! Entity value object

use serde::{Deserialize, Serialize};

/// A candidate the player may be thinking of (Value Object)
///
/// Entities are identified by their display name only. Ordering is the
/// byte-wise ordering of the name, which makes "lexicographically first"
/// guesses and sorted reports reproducible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(String);

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn into_name(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        Entity::new(s)
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity::new(s)
    }
}

impl std::borrow::Borrow<str> for Entity {
    fn borrow(&self) -> &str {
        &self.0
    }
}
