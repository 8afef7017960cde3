// crates/ontology-rules-core/src/relation.rs
// ============================================================================
// Module: Relation Type Carrier
// Description: Relation definition holding raw mapping rules and their typed form.
// Purpose: Attach validated mapping rules to the relation being created.
// Dependencies: crate::mapping, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`RelationType`] arrives with its mapping rules as raw JSON. Resolving
//! runs the [`MappingRuleValidator`] against the relation's `type` and keeps
//! the typed rules beside the raw payload; nothing is attached on failure.
//! No other entity is consulted, so existence checks for the referenced
//! object types or data view belong to the caller.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::mapping::MappingError;
use crate::mapping::MappingRuleValidator;
use crate::mapping::MappingRules;

/// Relation between a source and a target object type.
///
/// # Invariants
/// - `resolved_mapping` is `None` until [`RelationType::resolve_mapping_rules`]
///   succeeds, and is never serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationType {
    /// Relation identifier.
    #[serde(default)]
    pub id: String,
    /// Relation display name.
    #[serde(default)]
    pub name: String,
    /// Object type on the source side.
    #[serde(default)]
    pub source_object_type_id: String,
    /// Object type on the target side.
    #[serde(default)]
    pub target_object_type_id: String,
    /// Relation kind tag, `direct` or `data_view`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Raw mapping payload as supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_rules: Option<Value>,
    /// Validated mapping rules.
    #[serde(skip)]
    pub resolved_mapping: Option<MappingRules>,
}

impl RelationType {
    /// Validates `mapping_rules` against `kind` and stores the typed result.
    ///
    /// # Errors
    ///
    /// Returns the validator's [`MappingError`].
    pub fn resolve_mapping_rules(
        &mut self,
        validator: &MappingRuleValidator,
    ) -> Result<&MappingRules, MappingError> {
        let rules = validator.validate(&self.kind, self.mapping_rules.as_ref())?;
        Ok(self.resolved_mapping.insert(rules))
    }
}
