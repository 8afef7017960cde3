// crates/ontology-rules-core/src/condition/decoder.rs
// ============================================================================
// Module: Condition Decoder
// Description: Untyped JSON payload to validated condition tree.
// Purpose: Separate "is this shaped like a condition" from "is it consistent".
// Dependencies: crate::condition::{error, operator, tree, validator}, serde_json, tracing
// ============================================================================

//! ## Overview
//! Decoding is a two-step pipeline. The payload is first mapped structurally
//! onto [`ConditionNode`]s; shape problems surface as
//! [`ConditionError::MalformedCondition`]. The typed tree is then handed to the
//! [`ConditionValidator`], whose failures form the invalid-condition family.
//! Unknown keys are ignored. An absent, `null`, or blank payload decodes to
//! the empty tree, which applies no filtering.
//!
//! The whole payload is decoded before validation starts, so a shape error
//! or unknown operation anywhere in the tree is reported ahead of a contract
//! violation in an earlier sibling.
//! Security posture: payloads are untrusted; decoding is depth-bounded by the
//! same limit the validator enforces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::condition::error::ConditionError;
use crate::condition::operator::OperatorCatalog;
use crate::condition::tree::ConditionNode;
use crate::condition::tree::ConditionTree;
use crate::condition::tree::NodePath;
use crate::condition::tree::ValueSource;
use crate::condition::validator::ConditionLimits;
use crate::condition::validator::ConditionValidator;

// ============================================================================
// SECTION: Wire Keys
// ============================================================================

/// Operator tag key.
pub const OPERATION_KEY: &str = "operation";
/// Field name key.
pub const FIELD_KEY: &str = "field";
/// Legacy field name key, accepted when `field` is absent.
pub const NAME_KEY: &str = "name";
/// Right-hand side literal key.
pub const VALUE_KEY: &str = "value";
/// Right-hand side source key.
pub const VALUE_FROM_KEY: &str = "value_from";
/// Resolved stored value key for text matches.
pub const REAL_VALUE_KEY: &str = "real_value";
/// Child condition list key.
pub const SUB_CONDITIONS_KEY: &str = "sub_conditions";

// ============================================================================
// SECTION: Decoder
// ============================================================================

/// Decodes and validates condition payloads.
///
/// # Invariants
/// - Every tree returned by [`ConditionDecoder::decode`] has passed validation.
#[derive(Debug, Clone, Default)]
pub struct ConditionDecoder {
    /// Validator applied after structural decoding.
    validator: ConditionValidator,
}

impl ConditionDecoder {
    /// Creates a decoder enforcing `limits`.
    #[must_use]
    pub const fn new(limits: ConditionLimits) -> Self {
        Self {
            validator: ConditionValidator::new(limits),
        }
    }

    /// Creates a decoder with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Decodes `payload` into a validated tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::MalformedCondition`] when the payload is not
    /// shaped like a condition, or a validation error for contract violations.
    pub fn decode(&self, payload: Option<&Value>) -> Result<ConditionTree, ConditionError> {
        let Some(payload) = payload.filter(|payload| !is_blank(payload)) else {
            return Ok(ConditionTree::empty());
        };
        self.decode_node(payload, &NodePath::root())
            .map(ConditionTree::new)
            .and_then(|tree| {
                self.validator.validate(&tree)?;
                Ok(tree)
            })
            .inspect(|tree| debug!(nodes = tree.node_count(), "resolved condition"))
            .inspect_err(|err| debug!(kind = err.kind(), path = %err.path(), "rejected condition"))
    }

    /// Parses `input` as JSON, then decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::MalformedCondition`] when `input` is not JSON,
    /// otherwise the same errors as [`ConditionDecoder::decode`].
    pub fn decode_str(&self, input: &str) -> Result<ConditionTree, ConditionError> {
        let payload: Value = serde_json::from_str(input).map_err(|err| {
            ConditionError::malformed(&NodePath::root(), format!("invalid json: {err}"))
        })?;
        self.decode(Some(&payload))
    }

    /// Maps one payload object onto a node, recursing into combinators.
    fn decode_node(&self, payload: &Value, path: &NodePath) -> Result<ConditionNode, ConditionError> {
        let max_depth = self.validator.limits().max_depth;
        if path.depth() > max_depth {
            return Err(ConditionError::TooDeep {
                path: path.clone(),
                max_depth,
                actual_depth: path.depth(),
            });
        }

        let Value::Object(object) = payload else {
            return Err(ConditionError::malformed(
                path,
                format!("condition must be an object, got {}", json_type(payload)),
            ));
        };

        let operation = match object.get(OPERATION_KEY) {
            Some(Value::String(tag)) if !tag.trim().is_empty() => tag,
            Some(Value::String(_) | Value::Null) | None => {
                return Err(ConditionError::malformed(path, "operation is required"));
            }
            Some(other) => {
                return Err(ConditionError::malformed(
                    path,
                    format!("operation must be a string, got {}", json_type(other)),
                ));
            }
        };
        let operator = OperatorCatalog::resolve_at(operation, path)?;

        let sub_conditions = if operator.is_combinator() {
            self.decode_sub_conditions(object, path)?
        } else {
            if object.get(SUB_CONDITIONS_KEY).is_some_and(|subs| !is_blank_entry(subs)) {
                debug!(%path, %operator, "ignoring sub_conditions on leaf condition");
            }
            Vec::new()
        };

        Ok(ConditionNode {
            operator,
            field: decode_field(object, path)?,
            value: present(object, VALUE_KEY),
            value_from: decode_value_source(object, path)?,
            real_value: present(object, REAL_VALUE_KEY),
            sub_conditions,
        })
    }

    /// Decodes the child list of a combinator.
    fn decode_sub_conditions(
        &self,
        object: &Map<String, Value>,
        path: &NodePath,
    ) -> Result<Vec<ConditionNode>, ConditionError> {
        match object.get(SUB_CONDITIONS_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(children)) => children
                .iter()
                .enumerate()
                .map(|(index, child)| self.decode_node(child, &path.child(index)))
                .collect(),
            Some(other) => Err(ConditionError::malformed(
                path,
                format!("sub_conditions must be an array, got {}", json_type(other)),
            )),
        }
    }
}

// ============================================================================
// SECTION: Field Helpers
// ============================================================================

/// Reads the field name from `field`, falling back to `name`.
fn decode_field(object: &Map<String, Value>, path: &NodePath) -> Result<String, ConditionError> {
    for key in [FIELD_KEY, NAME_KEY] {
        match object.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::String(name)) => return Ok(name.clone()),
            Some(other) => {
                return Err(ConditionError::malformed(
                    path,
                    format!("{key} must be a string, got {}", json_type(other)),
                ));
            }
        }
    }
    Ok(String::new())
}

/// Reads `value_from`, defaulting to [`ValueSource::Const`].
fn decode_value_source(
    object: &Map<String, Value>,
    path: &NodePath,
) -> Result<ValueSource, ConditionError> {
    match object.get(VALUE_FROM_KEY) {
        None | Some(Value::Null) => Ok(ValueSource::Const),
        Some(Value::String(tag)) if tag.is_empty() => Ok(ValueSource::Const),
        Some(Value::String(tag)) => ValueSource::from_tag(tag).ok_or_else(|| {
            ConditionError::malformed(path, format!("value_from '{tag}' is not recognized"))
        }),
        Some(other) => Err(ConditionError::malformed(
            path,
            format!("value_from must be a string, got {}", json_type(other)),
        )),
    }
}

/// Clones a key's value, treating `null` as absent.
fn present(object: &Map<String, Value>, key: &str) -> Option<Value> {
    object.get(key).filter(|value| !value.is_null()).cloned()
}

/// Returns true when a payload requests no filtering at all.
///
/// Any non-null `value` counts as content, so `""` and `[]` operands still
/// need an operation.
fn is_blank(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(object) => {
            object.get(VALUE_KEY).is_none_or(Value::is_null)
                && [OPERATION_KEY, FIELD_KEY, NAME_KEY, VALUE_FROM_KEY, SUB_CONDITIONS_KEY]
                    .iter()
                    .all(|key| object.get(*key).is_none_or(is_blank_entry))
        }
        _ => false,
    }
}

/// Returns true for `null`, `""`, and `[]`.
fn is_blank_entry(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Names a JSON value's type for diagnostics.
const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
