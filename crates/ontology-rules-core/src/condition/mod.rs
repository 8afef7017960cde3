// crates/ontology-rules-core/src/condition/mod.rs
// ============================================================================
// Module: Search Conditions
// Description: Operator catalog, condition tree model, validator, and decoder.
// Purpose: Turn free-form filter payloads into validated predicate trees.
// Dependencies: regex, serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Filter payloads flow through [`ConditionDecoder`], which maps them onto
//! typed [`ConditionNode`]s and then runs the [`ConditionValidator`]. The
//! resulting [`ConditionTree`] is what search query builders consume.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod decoder;
pub mod error;
pub mod operator;
pub mod tree;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use decoder::ConditionDecoder;
pub use error::ConditionError;
pub use error::ConditionErrorFamily;
pub use operator::NameRequirement;
pub use operator::Operator;
pub use operator::OperatorCatalog;
pub use operator::OperatorContract;
pub use operator::ValueArity;
pub use tree::ConditionNode;
pub use tree::ConditionTree;
pub use tree::NodePath;
pub use tree::ValueSource;
pub use validator::ConditionLimits;
pub use validator::ConditionValidator;
pub use validator::DEFAULT_MAX_DEPTH;
pub use validator::DEFAULT_MAX_SUB_CONDITIONS;
