// crates/ontology-rules-core/src/condition/validator.rs
// ============================================================================
// Module: Condition Tree Validator
// Description: Operator contract, fan-out, and depth checks for condition trees.
// Purpose: Reject inconsistent condition trees before they reach a search backend.
// Dependencies: crate::condition::{error, operator, tree}, regex, serde_json
// ============================================================================

//! ## Overview
//! The validator walks a tree depth-first in pre-order and stops at the first
//! violation. Each node is checked against its operator contract before any
//! child is visited. Validation never mutates the tree, so running it twice on
//! the same tree yields the same outcome.
//! Security posture: condition payloads are untrusted; fan-out and depth are
//! both bounded so adversarial nesting cannot exhaust the stack.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use serde_json::Value;

use crate::condition::error::ConditionError;
use crate::condition::operator::NameRequirement;
use crate::condition::operator::Operator;
use crate::condition::operator::ValueArity;
use crate::condition::tree::ConditionNode;
use crate::condition::tree::ConditionTree;
use crate::condition::tree::NodePath;
use crate::condition::tree::ValueSource;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum number of sub-conditions per combinator.
pub const DEFAULT_MAX_SUB_CONDITIONS: usize = 10;
/// Default maximum nesting depth below the root node.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Element count required by interval operators.
pub const INTERVAL_ARITY: usize = 2;

/// Structural limits applied to condition trees.
///
/// # Invariants
/// - No invariants are enforced here; the config crate bounds loaded values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionLimits {
    /// Maximum sub-conditions a single combinator may carry.
    pub max_sub_conditions: usize,
    /// Maximum nesting depth below the root node.
    pub max_depth: usize,
}

impl Default for ConditionLimits {
    fn default() -> Self {
        Self {
            max_sub_conditions: DEFAULT_MAX_SUB_CONDITIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validator for condition trees.
///
/// # Invariants
/// - Uses the stored [`ConditionLimits`] for all structural decisions.
#[derive(Debug, Clone, Default)]
pub struct ConditionValidator {
    /// Fan-out and depth limits.
    limits: ConditionLimits,
}

impl ConditionValidator {
    /// Creates a validator with the given limits.
    #[must_use]
    pub const fn new(limits: ConditionLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Creates a validator with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns the active limits.
    #[must_use]
    pub const fn limits(&self) -> ConditionLimits {
        self.limits
    }

    /// Validates a whole tree and hands it back unchanged.
    ///
    /// The empty tree is always valid.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConditionError`] found in pre-order.
    pub fn validate<'a>(
        &self,
        tree: &'a ConditionTree,
    ) -> Result<&'a ConditionTree, ConditionError> {
        if let Some(root) = tree.root() {
            self.validate_at(root, &NodePath::root())?;
        }
        Ok(tree)
    }

    /// Validates a subtree, reporting paths relative to `node`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConditionError`] found in pre-order.
    pub fn validate_node(&self, node: &ConditionNode) -> Result<(), ConditionError> {
        self.validate_at(node, &NodePath::root())
    }

    /// Validates `node` at `path`, then its children.
    fn validate_at(&self, node: &ConditionNode, path: &NodePath) -> Result<(), ConditionError> {
        if path.depth() > self.limits.max_depth {
            return Err(ConditionError::TooDeep {
                path: path.clone(),
                max_depth: self.limits.max_depth,
                actual_depth: path.depth(),
            });
        }

        let contract = node.operator.contract();
        if contract.name == NameRequirement::Required && node.field.trim().is_empty() {
            return Err(ConditionError::MissingFieldName {
                path: path.clone(),
                operator: node.operator,
            });
        }

        if node.operator.is_combinator() {
            return self.validate_sub_conditions(node, path);
        }

        if node.value_from != ValueSource::Const {
            return Err(ConditionError::UnsupportedValueSource {
                path: path.clone(),
                operator: node.operator,
                value_from: node.value_from,
            });
        }

        check_value(node, contract.arity, path)
    }

    /// Checks combinator fan-out and recurses into each child.
    fn validate_sub_conditions(
        &self,
        node: &ConditionNode,
        path: &NodePath,
    ) -> Result<(), ConditionError> {
        let count = node.sub_conditions.len();
        if count == 0 {
            return Err(ConditionError::MissingSubConditions {
                path: path.clone(),
                operator: node.operator,
            });
        }
        if count > self.limits.max_sub_conditions {
            return Err(ConditionError::TooManySubConditions {
                path: path.clone(),
                operator: node.operator,
                max: self.limits.max_sub_conditions,
                actual: count,
            });
        }
        for (index, child) in node.sub_conditions.iter().enumerate() {
            self.validate_at(child, &path.child(index))?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Value Checks
// ============================================================================

/// Applies the arity rule for a leaf node.
fn check_value(
    node: &ConditionNode,
    arity: ValueArity,
    path: &NodePath,
) -> Result<(), ConditionError> {
    let operator = node.operator;
    match arity {
        ValueArity::None => Ok(()),
        ValueArity::Scalar => match node.value.as_ref() {
            None => Err(ConditionError::MissingValue {
                path: path.clone(),
                operator,
            }),
            Some(Value::Array(_)) => Err(ConditionError::ArrayValueNotAllowed {
                path: path.clone(),
                operator,
            }),
            Some(_) => Ok(()),
        },
        ValueArity::Pair => {
            let values = expect_array(node, path)?;
            if values.len() == INTERVAL_ARITY {
                Ok(())
            } else {
                Err(ConditionError::InvalidArrayLength {
                    path: path.clone(),
                    operator,
                    expected: INTERVAL_ARITY,
                    actual: values.len(),
                })
            }
        }
        ValueArity::NonEmptyArray => {
            if expect_array(node, path)?.is_empty() {
                Err(ConditionError::EmptyArrayValue {
                    path: path.clone(),
                    operator,
                })
            } else {
                Ok(())
            }
        }
        ValueArity::StringOnly => {
            if matches!(node.value, Some(Value::Array(_))) {
                return Err(ConditionError::ArrayValueNotAllowed {
                    path: path.clone(),
                    operator,
                });
            }
            let pattern = expect_string(node, path)?;
            if operator == Operator::Regex {
                compile_pattern(pattern, path)?;
            }
            Ok(())
        }
    }
}

/// Returns the node's value as an array or fails with `ArrayValueRequired`.
fn expect_array<'a>(
    node: &'a ConditionNode,
    path: &NodePath,
) -> Result<&'a [Value], ConditionError> {
    match node.value.as_ref() {
        Some(Value::Array(values)) => Ok(values),
        _ => Err(ConditionError::ArrayValueRequired {
            path: path.clone(),
            operator: node.operator,
        }),
    }
}

/// Returns the string the operator matches against.
///
/// Text-family operators check `real_value` instead of `value` when present.
fn expect_string<'a>(node: &'a ConditionNode, path: &NodePath) -> Result<&'a str, ConditionError> {
    let (field, candidate) = match node.real_value.as_ref() {
        Some(real) if node.operator.accepts_real_value() => ("real_value", Some(real)),
        _ => ("value", node.value.as_ref()),
    };
    candidate.and_then(Value::as_str).ok_or_else(|| ConditionError::NonStringValue {
        path: path.clone(),
        operator: node.operator,
        field,
    })
}

/// Compiles a regex pattern to confirm it is well-formed.
fn compile_pattern(pattern: &str, path: &NodePath) -> Result<(), ConditionError> {
    Regex::new(pattern).map(|_| ()).map_err(|err| ConditionError::InvalidRegex {
        path: path.clone(),
        detail: err.to_string(),
    })
}
