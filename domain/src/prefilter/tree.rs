//! Category decision tree
//!
//! A fixed yes/no tree that narrows the universe to one category before the
//! attribute questions start. The JSON form is
//! `{"Questions": <node>, "Categories": {label: [names]}}` where a node is
//! either a label string or `{"Question": text, "YES": node, "NO": node}`.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the category tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryNode {
    /// Category label
    Leaf(String),
    Question {
        #[serde(rename = "Question")]
        text: String,
        #[serde(rename = "YES")]
        yes: Box<CategoryNode>,
        #[serde(rename = "NO")]
        no: Box<CategoryNode>,
    },
}

impl CategoryNode {
    pub fn question(text: impl Into<String>, yes: CategoryNode, no: CategoryNode) -> Self {
        CategoryNode::Question {
            text: text.into(),
            yes: Box::new(yes),
            no: Box::new(no),
        }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        CategoryNode::Leaf(label.into())
    }

    /// All leaf labels, left (yes) branch first
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        self.collect_labels(&mut labels);
        labels
    }

    fn collect_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            CategoryNode::Leaf(label) => out.push(label),
            CategoryNode::Question { yes, no, .. } => {
                yes.collect_labels(out);
                no.collect_labels(out);
            }
        }
    }
}

/// The tree plus the listed options of each category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    #[serde(rename = "Questions")]
    pub root: CategoryNode,
    #[serde(rename = "Categories", default)]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl CategoryTree {
    pub fn new(root: CategoryNode) -> Self {
        Self {
            root,
            categories: BTreeMap::new(),
        }
    }

    /// Number of options listed for `label` (0 when unlisted)
    pub fn option_count(&self, label: &str) -> usize {
        self.categories.get(label).map_or(0, Vec::len)
    }
}

/// Where a [`CategoryWalker`] stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep<'a> {
    /// A question is pending
    Ask(&'a str),
    /// The walk reached a category label
    Selected(&'a str),
}

/// Walks a [`CategoryTree`] one answer at a time
#[derive(Debug, Clone)]
pub struct CategoryWalker<'a> {
    node: &'a CategoryNode,
    depth: usize,
}

impl<'a> CategoryWalker<'a> {
    pub fn new(tree: &'a CategoryTree) -> Self {
        Self {
            node: &tree.root,
            depth: 0,
        }
    }

    pub fn current(&self) -> WalkStep<'a> {
        let node: &'a CategoryNode = self.node;
        match node {
            CategoryNode::Leaf(label) => WalkStep::Selected(label),
            CategoryNode::Question { text, .. } => WalkStep::Ask(text),
        }
    }

    /// Number of answers given so far
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Follow the `YES` or `NO` branch of the pending question.
    pub fn answer(&mut self, yes: bool) -> Result<WalkStep<'a>, DomainError> {
        let node: &'a CategoryNode = self.node;
        match node {
            CategoryNode::Leaf(label) => Err(DomainError::CategoryWalkFinished(label.clone())),
            CategoryNode::Question { yes: y, no: n, .. } => {
                self.node = if yes { y.as_ref() } else { n.as_ref() };
                self.depth += 1;
                Ok(self.current())
            }
        }
    }
}
