//! Category pre-filter applied before the attribute game.

pub mod tree;

pub use tree::{CategoryNode, CategoryTree, CategoryWalker, WalkStep};
