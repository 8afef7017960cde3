// crates/ontology-rules-core/src/mapping/validator.rs
// ============================================================================
// Module: Mapping Rule Validator
// Description: Shape and consistency checks for relation mapping rules.
// Purpose: Accept only non-empty, non-duplicated, well-bridged mappings.
// Dependencies: crate::mapping::{error, rules}, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! The validator dispatches on the relation kind, decodes the payload into the
//! matching typed shape, and checks it in a fixed order. The first violation
//! is returned; nothing is partially accepted.
//! Security posture: mapping payloads are untrusted; every rule list is capped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::mapping::error::MappingError;
use crate::mapping::error::RuleSet;
use crate::mapping::rules::IndirectMapping;
use crate::mapping::rules::MappingRules;
use crate::mapping::rules::PropertyMapping;
use crate::mapping::rules::RELATION_KIND_DATA_VIEW;
use crate::mapping::rules::RelationKind;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum pairs per rule list.
pub const DEFAULT_MAX_MAPPING_RULES: usize = 1024;

/// Limits applied to mapping rule lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingLimits {
    /// Maximum pairs in a single rule list.
    pub max_rules: usize,
}

impl Default for MappingLimits {
    fn default() -> Self {
        Self {
            max_rules: DEFAULT_MAX_MAPPING_RULES,
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validator for relation mapping rules.
///
/// # Invariants
/// - Returned [`MappingRules`] always match the requested relation kind.
#[derive(Debug, Clone, Default)]
pub struct MappingRuleValidator {
    /// Rule list limits.
    limits: MappingLimits,
}

impl MappingRuleValidator {
    /// Creates a validator with the given limits.
    #[must_use]
    pub const fn new(limits: MappingLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Creates a validator with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Validates `payload` as the mapping rules of a `kind` relation.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] found.
    pub fn validate(
        &self,
        kind: &str,
        payload: Option<&Value>,
    ) -> Result<MappingRules, MappingError> {
        self.validate_inner(kind, payload)
            .inspect(|rules| {
                debug!(relation_kind = %rules.kind(), pairs = rules.pair_count(), "resolved mapping rules");
            })
            .inspect_err(|err| {
                debug!(relation_kind = kind, kind = err.kind(), "rejected mapping rules");
            })
    }

    /// Entry checks followed by per-kind dispatch.
    fn validate_inner(
        &self,
        kind: &str,
        payload: Option<&Value>,
    ) -> Result<MappingRules, MappingError> {
        if kind.trim().is_empty() {
            return Err(MappingError::MissingRelationKind);
        }
        let relation_kind =
            RelationKind::from_tag(kind).ok_or_else(|| MappingError::UnsupportedRelationKind {
                kind: kind.to_string(),
            })?;
        let payload =
            payload.filter(|payload| !payload.is_null()).ok_or(MappingError::MissingMappingRules)?;

        match relation_kind {
            RelationKind::Direct => self.validate_direct(payload).map(MappingRules::Direct),
            RelationKind::DataView => self.validate_data_view(payload).map(MappingRules::DataView),
        }
    }

    /// Decodes and checks a direct mapping.
    fn validate_direct(&self, payload: &Value) -> Result<Vec<PropertyMapping>, MappingError> {
        let rules = Vec::<PropertyMapping>::deserialize(payload).map_err(|err| {
            MappingError::DecodeError {
                kind: RelationKind::Direct,
                detail: err.to_string(),
            }
        })?;
        if rules.is_empty() {
            return Err(MappingError::EmptyMappingRules);
        }
        self.check_pairs(RuleSet::Direct, &rules)?;
        Ok(rules)
    }

    /// Decodes and checks a view-backed mapping.
    fn validate_data_view(&self, payload: &Value) -> Result<IndirectMapping, MappingError> {
        // Derived struct decoding also accepts sequences; only objects are valid here.
        if !payload.is_object() {
            return Err(MappingError::DecodeError {
                kind: RelationKind::DataView,
                detail: "expected an object".to_string(),
            });
        }
        let mapping = IndirectMapping::deserialize(payload).map_err(|err| {
            MappingError::DecodeError {
                kind: RelationKind::DataView,
                detail: err.to_string(),
            }
        })?;

        let source =
            mapping.backing_data_source.as_ref().ok_or(MappingError::MissingBridgingSource)?;
        match source.kind.as_deref() {
            None => return Err(MappingError::MissingBridgingKind),
            Some(kind) if kind.trim().is_empty() => return Err(MappingError::MissingBridgingKind),
            Some(RELATION_KIND_DATA_VIEW) => {}
            Some(other) => {
                return Err(MappingError::InvalidBridgingKind {
                    kind: other.to_string(),
                });
            }
        }
        if source.id.trim().is_empty() {
            return Err(MappingError::MissingBridgingId);
        }

        if mapping.source_mapping_rules.is_empty() {
            return Err(MappingError::EmptySourceRules);
        }
        self.check_pairs(RuleSet::SourceToBridge, &mapping.source_mapping_rules)?;

        if mapping.target_mapping_rules.is_empty() {
            return Err(MappingError::EmptyTargetRules);
        }
        self.check_pairs(RuleSet::BridgeToTarget, &mapping.target_mapping_rules)?;

        Ok(mapping)
    }

    /// Applies the count cap, then per-pair name and duplicate checks in order.
    fn check_pairs(&self, set: RuleSet, rules: &[PropertyMapping]) -> Result<(), MappingError> {
        if rules.len() > self.limits.max_rules {
            return Err(MappingError::TooManyMappingRules {
                rules: set,
                max: self.limits.max_rules,
                actual: rules.len(),
            });
        }

        let mut seen: HashMap<(&str, &str), usize> = HashMap::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            let source = rule.source_property.name.as_str();
            let target = rule.target_property.name.as_str();
            if source.trim().is_empty() {
                return Err(MappingError::EmptySourceField {
                    rules: set,
                    index,
                });
            }
            if target.trim().is_empty() {
                return Err(MappingError::EmptyTargetField {
                    rules: set,
                    index,
                });
            }
            match seen.entry((source, target)) {
                Entry::Occupied(first) => {
                    return Err(MappingError::DuplicateMappingPair {
                        rules: set,
                        index,
                        first_index: *first.get(),
                        source_field: source.to_string(),
                        target_field: target.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn cap_applies_before_pair_checks() {
        let validator = MappingRuleValidator::new(MappingLimits {
            max_rules: 1,
        });
        let payload = json!([
            {"source_property": {"name": ""}, "target_property": {"name": "b"}},
            {"source_property": {"name": "a"}, "target_property": {"name": "b"}}
        ]);
        let err = validator.validate("direct", Some(&payload)).unwrap_err();
        assert_eq!(err.kind(), "too_many_mapping_rules");
    }

    #[test]
    fn duplicate_reports_first_index() {
        let rules = vec![
            PropertyMapping::new("a", "x"),
            PropertyMapping::new("b", "y"),
            PropertyMapping::new("a", "x"),
        ];
        let err = MappingRuleValidator::with_defaults()
            .check_pairs(RuleSet::SourceToBridge, &rules)
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateMappingPair {
                rules: RuleSet::SourceToBridge,
                index: 2,
                first_index: 0,
                source_field: "a".to_string(),
                target_field: "x".to_string(),
            }
        );
    }

    #[test]
    fn same_source_with_different_target_is_not_duplicate() {
        let rules = vec![PropertyMapping::new("a", "x"), PropertyMapping::new("a", "y")];
        assert!(MappingRuleValidator::with_defaults().check_pairs(RuleSet::Direct, &rules).is_ok());
    }
}
