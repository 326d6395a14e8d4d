//! Attribute-based question selection

use crate::core::entity::Entity;
use crate::core::question::{AskedSet, Question, QuestionKey};
use crate::split::{Split, SplitEvaluator};
use crate::store::AttributeStore;
use std::collections::BTreeSet;

/// Picks the attribute question that best bisects the candidates
pub struct QuestionSelector<'a> {
    store: &'a AttributeStore,
}

impl<'a> QuestionSelector<'a> {
    pub fn new(store: &'a AttributeStore) -> Self {
        Self { store }
    }

    /// Best unused attribute question for `candidates`.
    ///
    /// Attributes are scanned in the store's name-sorted order and the first
    /// minimum-score split wins, so equal scores always resolve the same way.
    /// `None` means every attribute is asked or has no valid split.
    pub fn select(&self, candidates: &BTreeSet<Entity>, asked: &AskedSet) -> Option<Question> {
        self.select_with_split(candidates, asked)
            .map(|(question, _)| question)
    }

    /// Like [`select`](Self::select), also returning the winning split
    pub fn select_with_split(
        &self,
        candidates: &BTreeSet<Entity>,
        asked: &AskedSet,
    ) -> Option<(Question, Split)> {
        let mut best: Option<(&str, Split)> = None;

        for attribute in self.store.all_attributes() {
            if asked.contains(&QuestionKey::Attribute(attribute.name.clone())) {
                continue;
            }
            let Some(split) =
                SplitEvaluator::evaluate(self.store, candidates, attribute).into_split()
            else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((_, current)) => split.score < current.score,
            };
            if better {
                best = Some((attribute.name.as_str(), split));
            }
        }

        best.map(|(attribute, split)| {
            let question = match split.threshold {
                None => Question::Boolean {
                    attribute: attribute.to_string(),
                },
                Some(threshold) => Question::ScalarThreshold {
                    attribute: attribute.to_string(),
                    threshold,
                    reference: split.reference.clone(),
                },
            };
            (question, split)
        })
    }
}
