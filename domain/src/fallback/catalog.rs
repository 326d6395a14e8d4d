//! Predicate catalogs
//!
//! The primary catalog holds letter and word-shape predicates, ordered so
//! that the usually-most-balanced questions come first. The secondary
//! catalog holds coarse category hints, consulted only once the primary
//! catalog has nothing left to offer.

use super::predicate::{NamePredicate, NameTest};
use serde::{Deserialize, Serialize};

/// Which catalog a predicate was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogTier {
    Primary,
    Secondary,
}

impl CatalogTier {
    pub fn as_str(&self) -> &str {
        match self {
            CatalogTier::Primary => "primary",
            CatalogTier::Secondary => "secondary",
        }
    }
}

/// Ordered predicate catalogs
///
/// A tier missing from a catalog file is empty, not built-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateCatalog {
    #[serde(default)]
    pub primary: Vec<NamePredicate>,
    #[serde(default)]
    pub secondary: Vec<NamePredicate>,
}

impl Default for PredicateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PredicateCatalog {
    /// A catalog with no predicates at all
    pub fn empty() -> Self {
        Self {
            primary: Vec::new(),
            secondary: Vec::new(),
        }
    }

    /// The built-in letter strategy plus category-keyword hints
    pub fn builtin() -> Self {
        let mut primary = Vec::new();

        for letter in ["r", "i", "o", "t", "n"] {
            primary.push(contains_letter(letter));
        }
        for letter in ["s", "c", "b", "p", "m", "d", "a"] {
            primary.push(NamePredicate::new(
                format!("starts_{}", letter),
                format!("Does it start with the letter {}?", letter.to_uppercase()),
                NameTest::starts_with(letter),
            ));
        }
        for letter in ["e", "a", "l", "s"] {
            primary.push(contains_letter(letter));
        }
        for letter in ["e", "r", "n", "t", "s"] {
            primary.push(NamePredicate::new(
                format!("ends_{}", letter),
                format!("Does it end with the letter {}?", letter.to_uppercase()),
                NameTest::ends_with(letter),
            ));
        }
        primary.push(NamePredicate::new(
            "has_space",
            "Does it have a space in it (is it multiple words)?",
            NameTest::contains(" "),
        ));
        primary.push(NamePredicate::new(
            "long_word",
            "Is it a long word (10+ letters)?",
            NameTest::MinLength { count: 10 },
        ));

        let secondary = vec![
            NamePredicate::new(
                "exercise",
                "Is it an exercise or workout movement?",
                NameTest::any_keyword([
                    "press", "curl", "squat", "lift", "pull", "push", "row", "raise",
                    "extension", "lunge", "bridge", "plank", "crunch", "burpee", "jump",
                ]),
            ),
            NamePredicate::new(
                "motorcycle",
                "Is it a motorcycle model?",
                NameTest::AnyOf {
                    tests: vec![
                        NameTest::any_keyword([
                            "ninja", "cbr", "gsxr", "duke", "monster", "panigale", "r1", "r6",
                            "zx", "hayabusa", "fireblade",
                        ]),
                        NameTest::ContainsDigit,
                    ],
                },
            ),
            NamePredicate::new("state", "Is it a US state?", NameTest::one_of(US_STATES)),
        ];

        Self { primary, secondary }
    }

    pub fn tier(&self, tier: CatalogTier) -> &[NamePredicate] {
        match tier {
            CatalogTier::Primary => &self.primary,
            CatalogTier::Secondary => &self.secondary,
        }
    }

    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

fn contains_letter(letter: &str) -> NamePredicate {
    NamePredicate::new(
        format!("contains_{}", letter),
        format!("Does it contain the letter {}?", letter.to_uppercase()),
        NameTest::contains(letter),
    )
}

const US_STATES: [&str; 50] = [
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west virginia",
    "wisconsin",
    "wyoming",
];
