// crates/ontology-rules-core/src/condition/tree.rs
// ============================================================================
// Module: Condition Tree Model
// Description: Typed condition nodes, trees, and node paths.
// Purpose: Provide the normalized form handed to search query builders.
// Dependencies: crate::condition::operator, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ConditionTree`] is the resolved predicate of a search query. It is only
//! produced by the decoder, which validates it before returning, so holders of
//! a tree can rely on every node matching its operator contract. Trees
//! serialize back to the wire shape they were decoded from.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::condition::operator::Operator;

// ============================================================================
// SECTION: Node Paths
// ============================================================================

/// Location of a node inside a condition tree.
///
/// Renders as `$` for the root and `$.sub_conditions[i]` per level below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root node.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th sub-condition of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indexes = Vec::with_capacity(self.0.len() + 1);
        indexes.extend_from_slice(&self.0);
        indexes.push(index);
        Self(indexes)
    }

    /// Nesting depth; the root is depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Child indexes from the root down to this node.
    #[must_use]
    pub fn indexes(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for index in &self.0 {
            write!(f, ".sub_conditions[{index}]")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Value Sources
// ============================================================================

/// Where the right-hand side of a leaf condition comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// The literal in `value`.
    #[default]
    Const,
    /// Another field of the same entity. Not supported by search conditions.
    Field,
}

impl ValueSource {
    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Field => "field",
        }
    }

    /// Parses the wire spelling.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "const" => Some(Self::Const),
            "field" => Some(Self::Field),
            _ => None,
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Condition Nodes
// ============================================================================

/// One node of a condition tree.
///
/// # Invariants
/// - Combinators (`and`, `or`, `knn`) carry `sub_conditions`; leaves do not.
/// - `value_from` is always explicit after decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionNode {
    /// Operator tag.
    #[serde(rename = "operation")]
    pub operator: Operator,
    /// Field the predicate applies to. Empty when omitted.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    /// Right-hand side literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Source of the right-hand side.
    pub value_from: ValueSource,
    /// Resolved stored value for text matches, checked in place of `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_value: Option<Value>,
    /// Child predicates of a combinator.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_conditions: Vec<Self>,
}

impl ConditionNode {
    /// Creates a leaf node comparing `field` against `value`.
    #[must_use]
    pub fn leaf(operator: Operator, field: impl Into<String>, value: Value) -> Self {
        Self {
            operator,
            field: field.into(),
            value: Some(value),
            value_from: ValueSource::Const,
            real_value: None,
            sub_conditions: Vec::new(),
        }
    }

    /// Creates a combinator node over `sub_conditions`.
    #[must_use]
    pub const fn combinator(operator: Operator, sub_conditions: Vec<Self>) -> Self {
        Self {
            operator,
            field: String::new(),
            value: None,
            value_from: ValueSource::Const,
            real_value: None,
            sub_conditions,
        }
    }

    /// Counts this node and every descendant.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.sub_conditions.iter().map(Self::node_count).sum::<usize>()
    }
}

// ============================================================================
// SECTION: Condition Trees
// ============================================================================

/// Resolved predicate attached to a search query.
///
/// An empty tree means the query applies no filtering.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ConditionTree {
    /// Root node, if any filtering is requested.
    root: Option<ConditionNode>,
}

impl ConditionTree {
    /// Tree that applies no filtering.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            root: None,
        }
    }

    /// Tree rooted at `root`.
    #[must_use]
    pub const fn new(root: ConditionNode) -> Self {
        Self {
            root: Some(root),
        }
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> Option<&ConditionNode> {
        self.root.as_ref()
    }

    /// Returns true when no filtering is requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts every node in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, ConditionNode::node_count)
    }
}

impl From<ConditionNode> for ConditionTree {
    fn from(root: ConditionNode) -> Self {
        Self::new(root)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
