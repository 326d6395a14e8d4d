//! Name-based predicates
//!
//! A predicate is a pure test on an entity's display name. Tests are data,
//! so catalogs can be loaded from files and extended without code changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A test on an entity name. Text comparisons ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NameTest {
    /// Name contains `text` anywhere
    Contains { text: String },
    StartsWith { text: String },
    EndsWith { text: String },
    /// At least `count` characters, spaces not counted
    MinLength { count: usize },
    ContainsDigit,
    /// Name contains any of the keywords
    AnyKeyword { keywords: Vec<String> },
    /// Name equals one of the listed names
    OneOf { names: BTreeSet<String> },
    /// Any of the nested tests matches
    AnyOf { tests: Vec<NameTest> },
}

impl NameTest {
    pub fn contains(text: impl Into<String>) -> Self {
        NameTest::Contains { text: text.into() }
    }

    pub fn starts_with(text: impl Into<String>) -> Self {
        NameTest::StartsWith { text: text.into() }
    }

    pub fn ends_with(text: impl Into<String>) -> Self {
        NameTest::EndsWith { text: text.into() }
    }

    pub fn any_keyword<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameTest::AnyKeyword {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn one_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameTest::OneOf {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluate the test against a display name
    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.matches_lower(&lower)
    }

    fn matches_lower(&self, name: &str) -> bool {
        match self {
            NameTest::Contains { text } => name.contains(&text.to_lowercase()),
            NameTest::StartsWith { text } => name.starts_with(&text.to_lowercase()),
            NameTest::EndsWith { text } => name.ends_with(&text.to_lowercase()),
            NameTest::MinLength { count } => {
                name.chars().filter(|c| *c != ' ').count() >= *count
            }
            NameTest::ContainsDigit => name.chars().any(|c| c.is_ascii_digit()),
            NameTest::AnyKeyword { keywords } => keywords
                .iter()
                .any(|k| name.contains(&k.to_lowercase())),
            NameTest::OneOf { names } => names.iter().any(|n| n.to_lowercase() == name),
            NameTest::AnyOf { tests } => tests.iter().any(|t| t.matches_lower(name)),
        }
    }
}

/// A named, phrased predicate from a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePredicate {
    /// Stable identifier recorded in the asked set
    pub id: String,
    /// Question shown to the player
    pub prompt: String,
    pub test: NameTest,
}

impl NamePredicate {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, test: NameTest) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            test,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.test.matches(name)
    }
}
