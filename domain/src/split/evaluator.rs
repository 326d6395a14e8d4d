//! Split scoring
//!
//! Given a candidate subset and one attribute, find the yes/no question on
//! that attribute that bisects the subset most evenly. Scoring is a pure
//! function of its inputs.

use crate::attribute::{Attribute, AttributeKind, AttributeValue};
use crate::core::entity::Entity;
use crate::store::AttributeStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The best split found for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// `|yes - no|`; lower is better, 0 is a perfect bisection
    pub score: usize,
    pub yes_count: usize,
    pub no_count: usize,
    /// Scalar attributes only: "yes" means `value > threshold`
    pub threshold: Option<f64>,
    /// Scalar attributes only: an entity whose value equals the threshold
    pub reference: Option<Entity>,
}

/// Result of evaluating one attribute against a candidate subset
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    /// Every valued candidate falls on one side, or none has a value
    NoValidSplit,
    Valid(Split),
}

impl SplitOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, SplitOutcome::Valid(_))
    }

    pub fn into_split(self) -> Option<Split> {
        match self {
            SplitOutcome::Valid(split) => Some(split),
            SplitOutcome::NoValidSplit => None,
        }
    }
}

/// Stateless split scorer
pub struct SplitEvaluator;

impl SplitEvaluator {
    /// Evaluate `attribute` over `candidates`.
    ///
    /// Candidates lacking a value for the attribute are excluded from both
    /// sides. A valid split always has at least one entity on each side.
    pub fn evaluate(
        store: &AttributeStore,
        candidates: &BTreeSet<Entity>,
        attribute: &Attribute,
    ) -> SplitOutcome {
        let values = store.values_for(&attribute.name, candidates);
        match attribute.kind {
            AttributeKind::Boolean => Self::evaluate_boolean(&values),
            AttributeKind::Scalar => Self::evaluate_scalar(&values),
        }
    }

    fn evaluate_boolean(values: &[(&Entity, AttributeValue)]) -> SplitOutcome {
        let yes_count = values
            .iter()
            .filter(|(_, v)| v.as_flag() == Some(true))
            .count();
        let no_count = values
            .iter()
            .filter(|(_, v)| v.as_flag() == Some(false))
            .count();

        if yes_count == 0 || no_count == 0 {
            return SplitOutcome::NoValidSplit;
        }

        SplitOutcome::Valid(Split {
            score: yes_count.abs_diff(no_count),
            yes_count,
            no_count,
            threshold: None,
            reference: None,
        })
    }

    fn evaluate_scalar(values: &[(&Entity, AttributeValue)]) -> SplitOutcome {
        let mut ratings: Vec<(&Entity, f64)> = values
            .iter()
            .filter_map(|(entity, v)| v.as_rating().map(|r| (*entity, r)))
            .collect();
        ratings.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        let total = ratings.len();
        let mut best: Option<Split> = None;
        let mut i = 0;

        while i < total {
            let threshold = ratings[i].1;
            // Ties share one threshold; the first in name order is the reference.
            let reference = ratings[i].0;
            let mut j = i;
            while j < total && ratings[j].1 == threshold {
                j += 1;
            }

            let no_count = j;
            let yes_count = total - j;
            if yes_count > 0 {
                let score = yes_count.abs_diff(no_count);
                let better = match &best {
                    None => true,
                    Some(b) => score < b.score || (score == b.score && yes_count < b.yes_count),
                };
                if better {
                    best = Some(Split {
                        score,
                        yes_count,
                        no_count,
                        threshold: Some(threshold),
                        reference: Some(reference.clone()),
                    });
                }
            }

            i = j;
        }

        best.map_or(SplitOutcome::NoValidSplit, SplitOutcome::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::RawRating;
    use crate::store::EntityRecord;
    use std::collections::BTreeMap;

    fn scalar_store(values: &[(&str, f64)]) -> AttributeStore {
        let records = values.iter().map(|(name, v)| {
            EntityRecord::new(*name).with_rating("size", RawRating::Number(*v))
        });
        let kinds = BTreeMap::from([("size".to_string(), AttributeKind::Scalar)]);
        AttributeStore::build(records, &kinds).unwrap()
    }

    fn boolean_store(values: &[(&str, Option<bool>)]) -> AttributeStore {
        let records = values.iter().map(|(name, v)| {
            let record = EntityRecord::new(*name);
            match v {
                Some(b) => record.with_rating("fast", RawRating::Flag(*b)),
                None => record,
            }
        });
        let kinds = BTreeMap::from([("fast".to_string(), AttributeKind::Boolean)]);
        AttributeStore::build(records, &kinds).unwrap()
    }

    #[test]
    fn test_boolean_perfect_bisection() {
        let store = boolean_store(&[("cat", Some(false)), ("dog", Some(true))]);
        let outcome =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::boolean("fast"));
        let split = outcome.into_split().unwrap();
        assert_eq!(split.score, 0);
        assert_eq!((split.yes_count, split.no_count), (1, 1));
        assert!(split.threshold.is_none());
    }

    #[test]
    fn test_boolean_one_sided_is_invalid() {
        let store = boolean_store(&[("a", Some(true)), ("b", Some(true)), ("c", None)]);
        let outcome =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::boolean("fast"));
        assert_eq!(outcome, SplitOutcome::NoValidSplit);
    }

    #[test]
    fn test_boolean_excludes_missing_values() {
        let store = boolean_store(&[
            ("a", Some(true)),
            ("b", Some(false)),
            ("c", None),
            ("d", None),
        ]);
        let split =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::boolean("fast"))
                .into_split()
                .unwrap();
        assert_eq!(split.yes_count + split.no_count, 2);
        assert_eq!(split.score, 0);
    }

    #[test]
    fn test_scalar_five_values_bisects_two_vs_three() {
        let store = scalar_store(&[("a", 2.0), ("b", 4.0), ("c", 6.0), ("d", 8.0), ("e", 10.0)]);
        let split =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::scalar("size"))
                .into_split()
                .unwrap();
        assert_eq!(split.score, 1);
        // Both 4 and 6 give imbalance 1; the smaller "yes" group wins.
        assert_eq!(split.threshold, Some(6.0));
        assert_eq!((split.yes_count, split.no_count), (2, 3));
        assert_eq!(split.reference, Some(Entity::new("c")));
    }

    #[test]
    fn test_scalar_all_same_value_is_invalid() {
        let store = scalar_store(&[("a", 3.0), ("b", 3.0), ("c", 3.0)]);
        let outcome =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::scalar("size"));
        assert_eq!(outcome, SplitOutcome::NoValidSplit);
    }

    #[test]
    fn test_scalar_no_values_is_invalid() {
        let store = scalar_store(&[]);
        let outcome =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::scalar("size"));
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_scalar_duplicate_values_group_together() {
        let store = scalar_store(&[("a", 1.0), ("b", 5.0), ("c", 5.0), ("d", 9.0)]);
        let split =
            SplitEvaluator::evaluate(&store, &store.entity_set(), &Attribute::scalar("size"))
                .into_split()
                .unwrap();
        // > 1 gives 3/1, > 5 gives 1/3: equal imbalance, smaller yes side wins.
        assert_eq!(split.threshold, Some(5.0));
        assert_eq!(split.yes_count, 1);
        assert_eq!(split.reference, Some(Entity::new("b")));
    }

    #[test]
    fn test_scoring_respects_candidate_subset() {
        let store = scalar_store(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
        let subset: BTreeSet<Entity> = ["c", "d"].into_iter().map(Entity::from).collect();
        let split = SplitEvaluator::evaluate(&store, &subset, &Attribute::scalar("size"))
            .into_split()
            .unwrap();
        assert_eq!(split.threshold, Some(3.0));
        assert_eq!(split.score, 0);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let store = scalar_store(&[("a", 2.0), ("b", 7.0), ("c", 7.0), ("d", 1.0)]);
        let candidates = store.entity_set();
        let first = SplitEvaluator::evaluate(&store, &candidates, &Attribute::scalar("size"));
        let second = SplitEvaluator::evaluate(&store, &candidates, &Attribute::scalar("size"));
        assert_eq!(first, second);
    }
}
