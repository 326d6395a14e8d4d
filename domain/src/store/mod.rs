//! Attribute store: entities and their recorded attribute values.

pub mod attribute_store;

pub use attribute_store::{AttributeStore, EntityRecord};
