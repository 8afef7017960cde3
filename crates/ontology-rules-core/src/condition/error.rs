// crates/ontology-rules-core/src/condition/error.rs
// ============================================================================
// Module: Condition Errors
// Description: Decode and validation failures for condition payloads.
// Purpose: Report the first violation with the offending node path.
// Dependencies: crate::condition::{operator, tree}, thiserror
// ============================================================================

//! ## Overview
//! Condition failures split into two families: the payload was not shaped
//! like a condition at all ([`ConditionErrorFamily::Malformed`]), or it was
//! shaped correctly but broke an operator contract
//! ([`ConditionErrorFamily::Invalid`]). Every variant names the node path so
//! the caller can surface it verbatim.

use thiserror::Error;

use crate::condition::operator::Operator;
use crate::condition::tree::NodePath;
use crate::condition::tree::ValueSource;

/// Broad classification of a [`ConditionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionErrorFamily {
    /// The payload could not be decoded into a condition tree.
    Malformed,
    /// The decoded tree violates an operator contract or limit.
    Invalid,
}

/// Condition decode/validation error.
///
/// # Invariants
/// - Variants are stable for error classification; see [`ConditionError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// Payload shape does not describe a condition node.
    #[error("malformed condition at {path}: {detail}")]
    MalformedCondition {
        /// Node where decoding failed.
        path: NodePath,
        /// What was wrong with the payload.
        detail: String,
    },
    /// Operation tag is not in the operator catalog.
    #[error("condition at {path}: unsupported operation '{operation}'")]
    UnknownOperator {
        /// Offending node.
        path: NodePath,
        /// Tag as supplied by the caller.
        operation: String,
    },
    /// Operator requires a field name but none was given.
    #[error("condition at {path}: [{operator}] operation requires a field name")]
    MissingFieldName {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
    },
    /// Operator requires a value but none was given.
    #[error("condition at {path}: [{operator}] operation requires a value")]
    MissingValue {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
    },
    /// Operator takes a single value but received an array.
    #[error("condition at {path}: [{operator}] operation's value should be a single value")]
    ArrayValueNotAllowed {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
    },
    /// Operator takes an array but received something else.
    #[error("condition at {path}: [{operator}] operation's value must be an array, array expected")]
    ArrayValueRequired {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
    },
    /// Operator takes a fixed-length array of a different length.
    #[error(
        "condition at {path}: [{operator}] operation's value must contain {expected} values, got \
         {actual}"
    )]
    InvalidArrayLength {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
        /// Required element count.
        expected: usize,
        /// Supplied element count.
        actual: usize,
    },
    /// Operator takes a non-empty array but received an empty one.
    #[error("condition at {path}: [{operator}] operation's value should contain at least 1 value")]
    EmptyArrayValue {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
    },
    /// Operator takes a string but received another type.
    #[error("condition at {path}: [{operator}] operation's {field} should be a string")]
    NonStringValue {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
        /// Which payload key was checked (`value` or `real_value`).
        field: &'static str,
    },
    /// Regex pattern does not compile.
    #[error("condition at {path}: [regex] operation regular expression error: {detail}")]
    InvalidRegex {
        /// Offending node.
        path: NodePath,
        /// Compiler diagnostic.
        detail: String,
    },
    /// Leaf references a value source conditions cannot evaluate.
    #[error("condition at {path}: condition does not support value_from type ('{value_from}')")]
    UnsupportedValueSource {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
        /// Source as supplied.
        value_from: ValueSource,
    },
    /// Combinator has no sub-conditions.
    #[error("condition at {path}: [{operator}] operation requires at least 1 sub condition")]
    MissingSubConditions {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
    },
    /// Combinator fan-out exceeds the configured maximum.
    #[error("condition at {path}: the number of sub conditions {actual} exceeds {max}")]
    TooManySubConditions {
        /// Offending node.
        path: NodePath,
        /// Node operator.
        operator: Operator,
        /// Configured fan-out limit.
        max: usize,
        /// Supplied sub-condition count.
        actual: usize,
    },
    /// Tree nesting exceeds the configured maximum.
    #[error("condition at {path}: nesting depth {actual_depth} exceeds {max_depth}")]
    TooDeep {
        /// First node past the limit.
        path: NodePath,
        /// Configured depth limit.
        max_depth: usize,
        /// Depth of the offending node.
        actual_depth: usize,
    },
}

impl ConditionError {
    /// Returns the error family.
    #[must_use]
    pub const fn family(&self) -> ConditionErrorFamily {
        match self {
            Self::MalformedCondition {
                ..
            } => ConditionErrorFamily::Malformed,
            _ => ConditionErrorFamily::Invalid,
        }
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedCondition {
                ..
            } => "malformed_condition",
            Self::UnknownOperator {
                ..
            } => "unknown_operator",
            Self::MissingFieldName {
                ..
            } => "missing_field_name",
            Self::MissingValue {
                ..
            } => "missing_value",
            Self::ArrayValueNotAllowed {
                ..
            } => "array_value_not_allowed",
            Self::ArrayValueRequired {
                ..
            } => "array_value_required",
            Self::InvalidArrayLength {
                ..
            } => "invalid_array_length",
            Self::EmptyArrayValue {
                ..
            } => "empty_array_value",
            Self::NonStringValue {
                ..
            } => "non_string_value",
            Self::InvalidRegex {
                ..
            } => "invalid_regex",
            Self::UnsupportedValueSource {
                ..
            } => "unsupported_value_source",
            Self::MissingSubConditions {
                ..
            } => "missing_sub_conditions",
            Self::TooManySubConditions {
                ..
            } => "too_many_sub_conditions",
            Self::TooDeep {
                ..
            } => "too_deep",
        }
    }

    /// Returns the path of the node that failed.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        match self {
            Self::MalformedCondition {
                path, ..
            }
            | Self::UnknownOperator {
                path, ..
            }
            | Self::MissingFieldName {
                path, ..
            }
            | Self::MissingValue {
                path, ..
            }
            | Self::ArrayValueNotAllowed {
                path, ..
            }
            | Self::ArrayValueRequired {
                path, ..
            }
            | Self::InvalidArrayLength {
                path, ..
            }
            | Self::EmptyArrayValue {
                path, ..
            }
            | Self::NonStringValue {
                path, ..
            }
            | Self::InvalidRegex {
                path, ..
            }
            | Self::UnsupportedValueSource {
                path, ..
            }
            | Self::MissingSubConditions {
                path, ..
            }
            | Self::TooManySubConditions {
                path, ..
            }
            | Self::TooDeep {
                path, ..
            } => path,
        }
    }

    /// Builds a decode failure at `path`.
    pub(crate) fn malformed(path: &NodePath, detail: impl Into<String>) -> Self {
        Self::MalformedCondition {
            path: path.clone(),
            detail: detail.into(),
        }
    }
}
