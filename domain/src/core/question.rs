//! Question value object

use crate::core::entity::Entity;
use crate::fallback::{CatalogTier, NamePredicate};
use crate::store::AttributeStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of something that has been asked this session.
///
/// Attributes and predicates live in separate namespaces, so an attribute
/// called `long_word` never shadows the predicate with the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum QuestionKey {
    Attribute(String),
    Predicate(String),
}

impl QuestionKey {
    pub fn id(&self) -> &str {
        match self {
            QuestionKey::Attribute(id) | QuestionKey::Predicate(id) => id,
        }
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionKey::Attribute(id) => write!(f, "attribute:{}", id),
            QuestionKey::Predicate(id) => write!(f, "predicate:{}", id),
        }
    }
}

/// Everything asked so far in a session
pub type AskedSet = BTreeSet<QuestionKey>;

/// A yes/no question issued for one turn (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    /// "Is it `attribute`?"
    Boolean { attribute: String },
    /// "Is its `attribute` greater than ...?"; yes means `value > threshold`
    ScalarThreshold {
        attribute: String,
        threshold: f64,
        reference: Option<Entity>,
    },
    /// A name-pattern question from a fallback catalog
    Predicate {
        predicate: NamePredicate,
        tier: CatalogTier,
    },
}

impl Question {
    pub fn key(&self) -> QuestionKey {
        match self {
            Question::Boolean { attribute } | Question::ScalarThreshold { attribute, .. } => {
                QuestionKey::Attribute(attribute.clone())
            }
            Question::Predicate { predicate, .. } => QuestionKey::Predicate(predicate.id.clone()),
        }
    }

    /// Templated phrasing shown to the player
    pub fn prompt_text(&self) -> String {
        match self {
            Question::Boolean { attribute } => format!("Is it {}?", attribute),
            Question::ScalarThreshold {
                attribute,
                reference: Some(reference),
                ..
            } => format!(
                "Is its {} greater than the {} of a {}?",
                attribute, attribute, reference
            ),
            Question::ScalarThreshold {
                attribute,
                threshold,
                reference: None,
            } => format!("Is its {} greater than {}?", attribute, threshold),
            Question::Predicate { predicate, .. } => predicate.prompt.clone(),
        }
    }

    /// Whether `entity` belongs on the "yes" side of this question.
    ///
    /// An entity with no recorded value for the asked attribute is on the
    /// "no" side: it survives a "no" answer and is dropped by a "yes".
    pub fn accepts(&self, store: &AttributeStore, entity: &Entity) -> bool {
        match self {
            Question::Boolean { attribute } => store
                .value_of(entity, attribute)
                .and_then(|v| v.as_flag())
                == Some(true),
            Question::ScalarThreshold {
                attribute,
                threshold,
                ..
            } => store
                .value_of(entity, attribute)
                .and_then(|v| v.as_rating())
                .is_some_and(|v| v > *threshold),
            Question::Predicate { predicate, .. } => predicate.matches(entity.name()),
        }
    }

    /// Short label for logs and transcripts
    pub fn kind_label(&self) -> &str {
        match self {
            Question::Boolean { .. } => "boolean",
            Question::ScalarThreshold { .. } => "threshold",
            Question::Predicate {
                tier: CatalogTier::Primary,
                ..
            } => "pattern",
            Question::Predicate {
                tier: CatalogTier::Secondary,
                ..
            } => "category",
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt_text())
    }
}
