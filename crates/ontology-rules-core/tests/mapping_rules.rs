// crates/ontology-rules-core/tests/mapping_rules.rs
// ============================================================================
// Module: Mapping Rule Validator Tests
// Description: Direct and view-backed mapping checks plus relation attachment.
// Purpose: Pin each mapping rule violation to its error and check order.
// Dependencies: ontology_rules_core, serde_json
// ============================================================================
//! ## Overview
//! Integration tests for [`MappingRuleValidator`] and [`RelationType`].

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

use ontology_rules_core::MappingError;
use ontology_rules_core::MappingLimits;
use ontology_rules_core::MappingRuleValidator;
use ontology_rules_core::MappingRules;
use ontology_rules_core::RelationKind;
use ontology_rules_core::RelationType;
use ontology_rules_core::mapping::RuleSet;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::data_view_mapping;
use support::ensure;
use support::pair;

fn validate(kind: &str, payload: &Value) -> Result<MappingRules, MappingError> {
    MappingRuleValidator::with_defaults().validate(kind, Some(payload))
}

// ============================================================================
// SECTION: Entry Checks
// ============================================================================

#[test]
fn relation_kind_is_required_and_closed() -> TestResult {
    let payload = json!([pair("a", "b")]);
    ensure(validate("", &payload) == Err(MappingError::MissingRelationKind), "blank kind")?;
    ensure(validate("  ", &payload) == Err(MappingError::MissingRelationKind), "spaces")?;
    let err = validate("view", &payload).unwrap_err();
    ensure(
        err == MappingError::UnsupportedRelationKind {
            kind: "view".to_string(),
        },
        format!("got {err}"),
    )
}

#[test]
fn payload_is_required() -> TestResult {
    let validator = MappingRuleValidator::with_defaults();
    ensure(validator.validate("direct", None) == Err(MappingError::MissingMappingRules), "none")?;
    ensure(
        validator.validate("data_view", Some(&Value::Null)) == Err(MappingError::MissingMappingRules),
        "null",
    )
}

#[test]
fn shape_mismatch_is_a_decode_error() -> TestResult {
    let direct = validate("direct", &data_view_mapping()).unwrap_err();
    ensure(
        matches!(direct, MappingError::DecodeError { kind: RelationKind::Direct, .. }),
        format!("got {direct}"),
    )?;
    let view = validate("data_view", &json!([pair("a", "b")])).unwrap_err();
    ensure(
        matches!(view, MappingError::DecodeError { kind: RelationKind::DataView, .. }),
        format!("got {view}"),
    )
}

// ============================================================================
// SECTION: Direct Mappings
// ============================================================================

#[test]
fn direct_mapping_rejects_duplicate_pairs() -> TestResult {
    let err = validate("direct", &json!([pair("a", "b"), pair("a", "b")])).unwrap_err();
    ensure(
        matches!(err, MappingError::DuplicateMappingPair { index: 1, first_index: 0, .. }),
        format!("got {err}"),
    )
}

#[test]
fn direct_mapping_allows_shared_source_fields() -> TestResult {
    let rules = validate("direct", &json!([pair("a", "b"), pair("a", "c")]))?;
    ensure(rules.kind() == RelationKind::Direct, "kind")?;
    ensure(rules.pair_count() == 2, "pairs")
}

#[test]
fn direct_mapping_must_not_be_empty() -> TestResult {
    ensure(validate("direct", &json!([])) == Err(MappingError::EmptyMappingRules), "empty")
}

#[test]
fn direct_mapping_checks_names_in_index_order() -> TestResult {
    let err = validate("direct", &json!([pair("a", "b"), pair("", "c"), pair("d", "")])).unwrap_err();
    ensure(
        err == MappingError::EmptySourceField {
            rules: RuleSet::Direct,
            index: 1,
        },
        format!("got {err}"),
    )?;
    let missing_target = json!([{"source_property": {"name": "a"}}]);
    let err = validate("direct", &missing_target).unwrap_err();
    ensure(matches!(err, MappingError::EmptyTargetField { index: 0, .. }), format!("got {err}"))
}

#[test]
fn direct_mapping_round_trips_to_the_wire_shape() -> TestResult {
    let payload = json!([pair("a", "b")]);
    let rules = validate("direct", &payload)?;
    ensure(serde_json::to_value(&rules)? == payload, "serialized shape differs")
}

// ============================================================================
// SECTION: View-Backed Mappings
// ============================================================================

#[test]
fn data_view_mapping_accepts_a_full_example() -> TestResult {
    let rules = validate("data_view", &data_view_mapping())?;
    let MappingRules::DataView(mapping) = rules else {
        return Err("expected a data view mapping".into());
    };
    let source = mapping.backing_data_source.ok_or("backing source")?;
    ensure(source.id == "dv-orders", "bridge id")?;
    ensure(mapping.source_mapping_rules.len() == 1, "source rules")?;
    ensure(mapping.target_mapping_rules.len() == 1, "target rules")
}

#[test]
fn data_view_mapping_requires_bridging_id() -> TestResult {
    let mut payload = data_view_mapping();
    payload["backing_data_source"].as_object_mut().ok_or("object")?.remove("id");
    ensure(validate("data_view", &payload) == Err(MappingError::MissingBridgingId), "no id")?;
    payload["backing_data_source"]["id"] = json!("  ");
    ensure(validate("data_view", &payload) == Err(MappingError::MissingBridgingId), "blank id")
}

#[test]
fn data_view_mapping_checks_bridging_source_in_order() -> TestResult {
    let mut payload = data_view_mapping();
    payload.as_object_mut().ok_or("object")?.remove("backing_data_source");
    ensure(
        validate("data_view", &payload) == Err(MappingError::MissingBridgingSource),
        "missing source",
    )?;

    let mut payload = data_view_mapping();
    payload["backing_data_source"] = json!({"id": ""});
    ensure(
        validate("data_view", &payload) == Err(MappingError::MissingBridgingKind),
        "kind is checked before id",
    )?;

    payload["backing_data_source"] = json!({"type": "index_base", "id": "x"});
    ensure(
        validate("data_view", &payload)
            == Err(MappingError::InvalidBridgingKind {
                kind: "index_base".to_string(),
            }),
        "wrong kind",
    )?;

    payload["backing_data_source"] = json!({"type": "  ", "id": "x"});
    ensure(
        validate("data_view", &payload) == Err(MappingError::MissingBridgingKind),
        "whitespace kind is missing",
    )?;

    payload["backing_data_source"] = json!({"type": " data_view ", "id": "x"});
    ensure(
        validate("data_view", &payload)
            == Err(MappingError::InvalidBridgingKind {
                kind: " data_view ".to_string(),
            }),
        "padded kind must match exactly",
    )
}

#[test]
fn data_view_mapping_requires_both_hops() -> TestResult {
    let mut payload = data_view_mapping();
    payload["source_mapping_rules"] = json!([]);
    payload["target_mapping_rules"] = json!([]);
    ensure(validate("data_view", &payload) == Err(MappingError::EmptySourceRules), "source first")?;

    let mut payload = data_view_mapping();
    payload.as_object_mut().ok_or("object")?.remove("target_mapping_rules");
    ensure(validate("data_view", &payload) == Err(MappingError::EmptyTargetRules), "target")
}

#[test]
fn data_view_pair_errors_name_their_hop() -> TestResult {
    let mut payload = data_view_mapping();
    payload["source_mapping_rules"] = json!([pair("a", "b"), pair("a", "b")]);
    let err = validate("data_view", &payload).unwrap_err();
    ensure(
        matches!(err, MappingError::DuplicateMappingPair { rules: RuleSet::SourceToBridge, .. }),
        format!("got {err}"),
    )?;
    ensure(err.to_string().contains("source-to-bridge"), err.to_string())?;

    let mut payload = data_view_mapping();
    payload["target_mapping_rules"] = json!([pair("x", " ")]);
    let err = validate("data_view", &payload).unwrap_err();
    ensure(
        err == MappingError::EmptyTargetField {
            rules: RuleSet::BridgeToTarget,
            index: 0,
        },
        format!("got {err}"),
    )
}

#[test]
fn the_same_pair_may_appear_on_both_hops() -> TestResult {
    let mut payload = data_view_mapping();
    payload["source_mapping_rules"] = json!([pair("k", "k")]);
    payload["target_mapping_rules"] = json!([pair("k", "k")]);
    ensure(validate("data_view", &payload).is_ok(), "duplicates are scoped per hop")
}

// ============================================================================
// SECTION: Limits
// ============================================================================

#[test]
fn rule_lists_are_capped() -> TestResult {
    let validator = MappingRuleValidator::new(MappingLimits {
        max_rules: 2,
    });
    let mut payload = data_view_mapping();
    payload["target_mapping_rules"] = json!([pair("a", "1"), pair("b", "2"), pair("c", "3")]);
    let err = validator.validate("data_view", Some(&payload)).unwrap_err();
    ensure(
        err == MappingError::TooManyMappingRules {
            rules: RuleSet::BridgeToTarget,
            max: 2,
            actual: 3,
        },
        format!("got {err}"),
    )?;
    ensure(err.kind() == "too_many_mapping_rules", err.kind())
}

// ============================================================================
// SECTION: Relation Attachment
// ============================================================================

#[test]
fn relation_type_attaches_resolved_rules() -> TestResult {
    let mut relation: RelationType = serde_json::from_value(json!({
        "id": "rel-1",
        "name": "customer orders",
        "source_object_type_id": "customer",
        "target_object_type_id": "order",
        "type": "data_view",
        "mapping_rules": data_view_mapping()
    }))?;
    let validator = MappingRuleValidator::with_defaults();
    let kind = relation.resolve_mapping_rules(&validator)?.kind();
    ensure(kind == RelationKind::DataView, "resolved kind")?;
    ensure(relation.resolved_mapping.is_some(), "rules attached")?;

    let encoded = serde_json::to_value(&relation)?;
    ensure(encoded["type"] == "data_view", "type key")?;
    ensure(encoded.get("resolved_mapping").is_none(), "resolved rules are not serialized")
}

#[test]
fn relation_type_without_kind_is_rejected() -> TestResult {
    let mut relation = RelationType {
        mapping_rules: Some(json!([pair("a", "b")])),
        ..RelationType::default()
    };
    let err = relation.resolve_mapping_rules(&MappingRuleValidator::with_defaults()).unwrap_err();
    ensure(err == MappingError::MissingRelationKind, format!("got {err}"))?;
    ensure(relation.resolved_mapping.is_none(), "nothing attached on failure")
}
