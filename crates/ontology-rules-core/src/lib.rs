// crates/ontology-rules-core/src/lib.rs
// ============================================================================
// Module: Ontology Rules Core
// Description: Declarative validation for ontology search filters and relation mappings.
// Purpose: Public API surface for condition trees and mapping rule checks.
// Dependencies: crate::{condition, mapping, query, relation}
// ============================================================================

//! ## Overview
//! Two validators make up the core:
//! - [`ConditionDecoder`] turns an untyped filter payload into a validated
//!   [`ConditionTree`], checking each node against the closed
//!   [`OperatorCatalog`].
//! - [`MappingRuleValidator`] checks direct and view-backed relation mappings
//!   for emptiness, duplication, and bridging consistency.
//!
//! Both are pure and synchronous and hold only immutable limits.
//!
//! Security posture: every payload is untrusted; recursion and list sizes are
//! bounded by [`ConditionLimits`] and [`MappingLimits`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod condition;
pub mod mapping;
pub mod query;
pub mod relation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use condition::ConditionDecoder;
pub use condition::ConditionError;
pub use condition::ConditionErrorFamily;
pub use condition::ConditionLimits;
pub use condition::ConditionNode;
pub use condition::ConditionTree;
pub use condition::ConditionValidator;
pub use condition::NameRequirement;
pub use condition::NodePath;
pub use condition::Operator;
pub use condition::OperatorCatalog;
pub use condition::OperatorContract;
pub use condition::ValueArity;
pub use condition::ValueSource;
pub use mapping::MappingError;
pub use mapping::MappingLimits;
pub use mapping::MappingRuleValidator;
pub use mapping::MappingRules;
pub use mapping::PropertyMapping;
pub use mapping::RelationKind;
pub use query::SearchQuery;
pub use relation::RelationType;
