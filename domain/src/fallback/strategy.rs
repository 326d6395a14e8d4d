//! Fallback question source
//!
//! Used once attribute data can no longer split the candidates. Picks the
//! unused predicate with the best yes/no balance, primary catalog first.

use super::catalog::{CatalogTier, PredicateCatalog};
use super::predicate::NamePredicate;
use crate::core::entity::Entity;
use crate::core::question::{AskedSet, Question, QuestionKey};
use std::collections::BTreeSet;

/// Default minimum share of candidates the smaller side of a secondary
/// predicate must hold
pub const DEFAULT_SECONDARY_MIN_FRACTION: f64 = 0.15;

/// Picks name-pattern questions from a [`PredicateCatalog`]
#[derive(Debug, Clone)]
pub struct FallbackStrategy {
    catalog: PredicateCatalog,
    secondary_min_fraction: f64,
}

impl Default for FallbackStrategy {
    fn default() -> Self {
        Self::new(PredicateCatalog::builtin())
    }
}

/// Yes/no counts of a predicate over the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Balance {
    yes: usize,
    no: usize,
}

impl Balance {
    fn smaller(&self) -> usize {
        self.yes.min(self.no)
    }

    fn larger(&self) -> usize {
        self.yes.max(self.no)
    }

    /// `smaller/larger` strictly greater than `other`'s, compared exactly
    fn beats(&self, other: &Balance) -> bool {
        self.smaller() * other.larger() > other.smaller() * self.larger()
    }
}

impl FallbackStrategy {
    pub fn new(catalog: PredicateCatalog) -> Self {
        Self {
            catalog,
            secondary_min_fraction: DEFAULT_SECONDARY_MIN_FRACTION,
        }
    }

    pub fn with_secondary_min_fraction(mut self, fraction: f64) -> Self {
        self.secondary_min_fraction = fraction;
        self
    }

    pub fn catalog(&self) -> &PredicateCatalog {
        &self.catalog
    }

    pub fn secondary_min_fraction(&self) -> f64 {
        self.secondary_min_fraction
    }

    /// Pick the next predicate question, or `None` when both catalogs are
    /// exhausted for these candidates.
    ///
    /// Ties on balance go to the earlier predicate in catalog order. The
    /// secondary catalog is only consulted when no primary predicate splits
    /// the candidates.
    pub fn select_predicate(
        &self,
        candidates: &BTreeSet<Entity>,
        asked: &AskedSet,
    ) -> Option<Question> {
        self.best_in_tier(CatalogTier::Primary, candidates, asked, 0.0)
            .or_else(|| {
                self.best_in_tier(
                    CatalogTier::Secondary,
                    candidates,
                    asked,
                    self.secondary_min_fraction,
                )
            })
    }

    fn best_in_tier(
        &self,
        tier: CatalogTier,
        candidates: &BTreeSet<Entity>,
        asked: &AskedSet,
        min_fraction: f64,
    ) -> Option<Question> {
        let total = candidates.len();
        let mut best: Option<(&NamePredicate, Balance)> = None;

        for predicate in self.catalog.tier(tier) {
            if asked.contains(&QuestionKey::Predicate(predicate.id.clone())) {
                continue;
            }

            let yes = candidates
                .iter()
                .filter(|entity| predicate.matches(entity.name()))
                .count();
            let balance = Balance {
                yes,
                no: total - yes,
            };
            if balance.smaller() == 0 {
                continue;
            }
            if (balance.smaller() as f64) < min_fraction * total as f64 {
                continue;
            }

            let better = match &best {
                None => true,
                Some((_, current)) => balance.beats(current),
            };
            if better {
                best = Some((predicate, balance));
            }
        }

        best.map(|(predicate, _)| Question::Predicate {
            predicate: predicate.clone(),
            tier,
        })
    }
}
