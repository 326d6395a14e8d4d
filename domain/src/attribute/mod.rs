//! Attributes and their values.
//!
//! - [`value_objects::Attribute`]: a named, kinded attribute
//! - [`value_objects::AttributeValue`]: a typed value recorded for an entity
//! - [`value_objects::RawRating`]: an untyped rating as ingested

pub mod value_objects;

pub use value_objects::{Attribute, AttributeKind, AttributeValue, RawRating};
