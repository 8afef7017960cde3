// crates/ontology-rules-core/tests/condition_validation.rs
// ============================================================================
// Module: Condition Validator Tests
// Description: Operator contract, fan-out, and depth checks on typed trees.
// Purpose: Pin each validation rule to the error it raises.
// Dependencies: ontology_rules_core, serde_json
// ============================================================================
//! ## Overview
//! Integration tests for [`ConditionValidator`] over hand-built trees.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use ontology_rules_core::ConditionError;
use ontology_rules_core::ConditionErrorFamily;
use ontology_rules_core::ConditionLimits;
use ontology_rules_core::ConditionNode;
use ontology_rules_core::ConditionTree;
use ontology_rules_core::ConditionValidator;
use ontology_rules_core::NodePath;
use ontology_rules_core::Operator;
use ontology_rules_core::ValueArity;
use ontology_rules_core::ValueSource;
use serde_json::json;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn validate(node: ConditionNode) -> Result<(), ConditionError> {
    ConditionValidator::with_defaults().validate_node(&node)
}

fn operators_with(arity: ValueArity) -> impl Iterator<Item = Operator> {
    Operator::ALL.into_iter().filter(move |op| op.contract().arity == arity)
}

// ============================================================================
// SECTION: Scalar Operators
// ============================================================================

#[test]
fn scalar_operators_reject_array_values() -> TestResult {
    for operator in operators_with(ValueArity::Scalar) {
        let err = validate(ConditionNode::leaf(operator, "f1", json!(["a", "b"]))).unwrap_err();
        ensure(
            matches!(err, ConditionError::ArrayValueNotAllowed { .. }),
            format!("{operator}: expected ArrayValueNotAllowed, got {err}"),
        )?;
    }
    Ok(())
}

#[test]
fn scalar_operators_accept_structured_scalars() -> TestResult {
    for operator in operators_with(ValueArity::Scalar) {
        for value in [json!("v1"), json!(42), json!(true), json!({"offset": "-1d"}), json!(null)] {
            let outcome = validate(ConditionNode::leaf(operator, "f1", value.clone()));
            ensure(outcome.is_ok(), format!("{operator} should accept {value}: {outcome:?}"))?;
        }
    }
    Ok(())
}

#[test]
fn scalar_operators_require_a_value() -> TestResult {
    let mut node = ConditionNode::leaf(Operator::Eq, "f1", json!("v1"));
    node.value = None;
    let err = validate(node).unwrap_err();
    ensure(matches!(err, ConditionError::MissingValue { .. }), format!("got {err}"))
}

#[test]
fn multi_match_may_omit_the_field_name() -> TestResult {
    let outcome = validate(ConditionNode::leaf(Operator::MultiMatch, "", json!("needle")));
    ensure(outcome.is_ok(), format!("multi_match without a field: {outcome:?}"))
}

#[test]
fn blank_field_name_is_rejected_for_required_operators() -> TestResult {
    let err = validate(ConditionNode::leaf(Operator::Gt, "   ", json!(1))).unwrap_err();
    ensure(
        err == ConditionError::MissingFieldName {
            path: NodePath::root(),
            operator: Operator::Gt,
        },
        format!("got {err}"),
    )
}

// ============================================================================
// SECTION: Array Operators
// ============================================================================

#[test]
fn membership_operators_require_non_empty_arrays() -> TestResult {
    for operator in [Operator::In, Operator::NotIn] {
        let empty = validate(ConditionNode::leaf(operator, "f2", json!([]))).unwrap_err();
        ensure(matches!(empty, ConditionError::EmptyArrayValue { .. }), format!("{empty}"))?;

        let scalar = validate(ConditionNode::leaf(operator, "f2", json!("v2"))).unwrap_err();
        ensure(matches!(scalar, ConditionError::ArrayValueRequired { .. }), format!("{scalar}"))?;
        ensure(scalar.to_string().contains("array expected"), scalar.to_string())?;

        ensure(validate(ConditionNode::leaf(operator, "f2", json!(["v2"]))).is_ok(), "one item")?;
        ensure(validate(ConditionNode::leaf(operator, "f2", json!([1, 2, 3]))).is_ok(), "many")?;
    }
    Ok(())
}

#[test]
fn interval_operators_require_exactly_two_elements() -> TestResult {
    for operator in operators_with(ValueArity::Pair) {
        for value in [json!([]), json!([1]), json!([1, 2, 3])] {
            let err = validate(ConditionNode::leaf(operator, "ts", value.clone())).unwrap_err();
            ensure(
                matches!(err, ConditionError::InvalidArrayLength { expected: 2, .. }),
                format!("{operator} with {value}: got {err}"),
            )?;
        }
        ensure(validate(ConditionNode::leaf(operator, "ts", json!([1, 2]))).is_ok(), "ordered")?;
        ensure(validate(ConditionNode::leaf(operator, "ts", json!([9, 2]))).is_ok(), "reversed")?;
    }
    Ok(())
}

#[test]
fn interval_operators_reject_scalars_before_length() -> TestResult {
    let err = validate(ConditionNode::leaf(Operator::Between, "ts", json!(5))).unwrap_err();
    ensure(matches!(err, ConditionError::ArrayValueRequired { .. }), format!("got {err}"))
}

// ============================================================================
// SECTION: Text Operators
// ============================================================================

#[test]
fn text_operators_require_strings() -> TestResult {
    for operator in operators_with(ValueArity::StringOnly) {
        let err = validate(ConditionNode::leaf(operator, "name", json!(7))).unwrap_err();
        ensure(
            matches!(err, ConditionError::NonStringValue { field: "value", .. }),
            format!("{operator}: got {err}"),
        )?;

        let array = validate(ConditionNode::leaf(operator, "name", json!(["a"]))).unwrap_err();
        ensure(
            matches!(array, ConditionError::ArrayValueNotAllowed { .. }),
            format!("{operator}: got {array}"),
        )?;
    }
    Ok(())
}

#[test]
fn real_value_overrides_value_for_like() -> TestResult {
    let mut node = ConditionNode::leaf(Operator::Like, "status", json!(3));
    node.real_value = Some(json!("act%"));
    ensure(validate(node.clone()).is_ok(), "string real_value should satisfy like")?;

    node.real_value = Some(json!(3));
    let err = validate(node).unwrap_err();
    ensure(
        matches!(err, ConditionError::NonStringValue { field: "real_value", .. }),
        format!("got {err}"),
    )
}

#[test]
fn real_value_is_ignored_for_regex() -> TestResult {
    let mut node = ConditionNode::leaf(Operator::Regex, "name", json!(3));
    node.real_value = Some(json!("^ok$"));
    let err = validate(node).unwrap_err();
    ensure(
        matches!(err, ConditionError::NonStringValue { field: "value", .. }),
        format!("got {err}"),
    )
}

#[test]
fn regex_patterns_must_compile() -> TestResult {
    let err = validate(ConditionNode::leaf(Operator::Regex, "name", json!("(unclosed"))).unwrap_err();
    ensure(matches!(err, ConditionError::InvalidRegex { .. }), format!("got {err}"))?;
    ensure(validate(ConditionNode::leaf(Operator::Regex, "name", json!("^test.*"))).is_ok(), "ok")
}

// ============================================================================
// SECTION: Value Source
// ============================================================================

#[test]
fn field_value_source_is_unsupported_on_leaves() -> TestResult {
    let mut node = ConditionNode::leaf(Operator::Eq, "f1", json!("other_field"));
    node.value_from = ValueSource::Field;
    let err = validate(node).unwrap_err();
    ensure(
        matches!(err, ConditionError::UnsupportedValueSource { value_from: ValueSource::Field, .. }),
        format!("got {err}"),
    )
}

#[test]
fn combinators_ignore_value_source() -> TestResult {
    let mut node =
        ConditionNode::combinator(Operator::And, vec![ConditionNode::leaf(Operator::Eq, "a", json!(1))]);
    node.value_from = ValueSource::Field;
    ensure(validate(node).is_ok(), "combinator value_from is not checked")
}

// ============================================================================
// SECTION: Combinators
// ============================================================================

fn leaves(count: usize) -> Vec<ConditionNode> {
    (0 .. count).map(|index| ConditionNode::leaf(Operator::Eq, format!("f{index}"), json!(index))).collect()
}

#[test]
fn combinators_cap_sub_condition_count() -> TestResult {
    for operator in [Operator::And, Operator::Or, Operator::Knn] {
        ensure(validate(ConditionNode::combinator(operator, leaves(10))).is_ok(), "exactly max")?;
        let err = validate(ConditionNode::combinator(operator, leaves(11))).unwrap_err();
        ensure(
            matches!(err, ConditionError::TooManySubConditions { max: 10, actual: 11, .. }),
            format!("{operator}: got {err}"),
        )?;
    }
    Ok(())
}

#[test]
fn combinators_require_children() -> TestResult {
    let err = validate(ConditionNode::combinator(Operator::Or, Vec::new())).unwrap_err();
    ensure(matches!(err, ConditionError::MissingSubConditions { .. }), format!("got {err}"))?;
    ensure(validate(ConditionNode::combinator(Operator::Or, leaves(1))).is_ok(), "single child")
}

#[test]
fn custom_limits_are_honored() -> TestResult {
    let validator = ConditionValidator::new(ConditionLimits {
        max_sub_conditions: 2,
        max_depth: 32,
    });
    let err = validator.validate_node(&ConditionNode::combinator(Operator::And, leaves(3))).unwrap_err();
    ensure(matches!(err, ConditionError::TooManySubConditions { max: 2, .. }), format!("{err}"))
}

#[test]
fn errors_report_the_failing_child_path() -> TestResult {
    let tree = ConditionTree::new(ConditionNode::combinator(
        Operator::And,
        vec![
            ConditionNode::leaf(Operator::Eq, "f1", json!("v1")),
            ConditionNode::combinator(
                Operator::Or,
                vec![
                    ConditionNode::leaf(Operator::In, "f2", json!(["x"])),
                    ConditionNode::leaf(Operator::In, "f3", json!([])),
                ],
            ),
        ],
    ));
    let err = ConditionValidator::with_defaults().validate(&tree).unwrap_err();
    ensure(err.path().indexes() == [1, 1], format!("path {}", err.path()))?;
    ensure(err.path().to_string() == "$.sub_conditions[1].sub_conditions[1]", err.path().to_string())?;
    ensure(err.family() == ConditionErrorFamily::Invalid, "validation family")?;
    ensure(err.kind() == "empty_array_value", err.kind())
}

#[test]
fn deep_chains_fail_too_deep() -> TestResult {
    let validator = ConditionValidator::new(ConditionLimits {
        max_sub_conditions: 10,
        max_depth: 4,
    });
    let mut node = ConditionNode::leaf(Operator::Eq, "leaf", json!(1));
    for _ in 0 .. 5 {
        node = ConditionNode::combinator(Operator::And, vec![node]);
    }
    let err = validator.validate_node(&node).unwrap_err();
    ensure(
        matches!(err, ConditionError::TooDeep { max_depth: 4, actual_depth: 5, .. }),
        format!("got {err}"),
    )
}

#[test]
fn validation_is_idempotent_and_non_mutating() -> TestResult {
    let tree = ConditionTree::new(ConditionNode::combinator(Operator::And, leaves(3)));
    let before = tree.clone();
    let validator = ConditionValidator::with_defaults();
    let first = validator.validate(&tree)?.clone();
    let second = validator.validate(&tree)?.clone();
    ensure(first == before && second == before, "tree changed across validations")
}

#[test]
fn empty_tree_is_valid() -> TestResult {
    let tree = ConditionTree::empty();
    ensure(ConditionValidator::with_defaults().validate(&tree).is_ok(), "empty tree")
}
