//! Fallback questions from name-pattern predicate catalogs.
//!
//! - [`predicate::NamePredicate`]: an id, a prompt and a [`predicate::NameTest`]
//! - [`catalog::PredicateCatalog`]: ordered primary and secondary catalogs
//! - [`strategy::FallbackStrategy`]: picks the best-balanced unused predicate

pub mod catalog;
pub mod predicate;
pub mod strategy;

pub use catalog::{CatalogTier, PredicateCatalog};
pub use predicate::{NamePredicate, NameTest};
pub use strategy::{DEFAULT_SECONDARY_MIN_FRACTION, FallbackStrategy};
