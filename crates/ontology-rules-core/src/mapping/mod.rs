// crates/ontology-rules-core/src/mapping/mod.rs
// ============================================================================
// Module: Relation Mappings
// Description: Mapping rule types and validator for relation types.
// Purpose: Check direct and view-backed mappings for internal consistency.
// Dependencies: serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`MappingRuleValidator`] turns the raw `mapping_rules` payload of a relation
//! into typed [`MappingRules`], rejecting empty, duplicated, or badly bridged
//! rules with a [`MappingError`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod rules;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::MappingError;
pub use error::RuleSet;
pub use rules::BackingDataSource;
pub use rules::IndirectMapping;
pub use rules::MappingRules;
pub use rules::PropertyMapping;
pub use rules::RELATION_KIND_DATA_VIEW;
pub use rules::RELATION_KIND_DIRECT;
pub use rules::RelationKind;
pub use rules::SimpleProperty;
pub use validator::DEFAULT_MAX_MAPPING_RULES;
pub use validator::MappingLimits;
pub use validator::MappingRuleValidator;
