// crates/ontology-rules-core/src/query.rs
// ============================================================================
// Module: Search Query Carrier
// Description: Search request holding a raw filter and its resolved tree.
// Purpose: Decode the filter once so later stages never re-read the payload.
// Dependencies: crate::condition, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`SearchQuery`] arrives with an untyped `condition` payload. Calling
//! [`SearchQuery::resolve_condition`] decodes and validates it, then stores
//! the typed tree in [`SearchQuery::resolved_condition`]. Keys other than
//! `condition` are kept verbatim in [`SearchQuery::extra`].

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::condition::ConditionDecoder;
use crate::condition::ConditionError;
use crate::condition::ConditionTree;

/// Search request over ontology entities.
///
/// # Invariants
/// - `resolved_condition` is empty until [`SearchQuery::resolve_condition`]
///   succeeds, and is never serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Raw filter payload as supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
    /// Remaining request keys, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Validated filter tree.
    #[serde(skip)]
    pub resolved_condition: ConditionTree,
}

impl SearchQuery {
    /// Creates a query with the given raw filter.
    #[must_use]
    pub fn with_condition(condition: Value) -> Self {
        Self {
            condition: Some(condition),
            ..Self::default()
        }
    }

    /// Decodes `condition` and stores the validated tree.
    ///
    /// On failure the previously resolved tree is left in place.
    ///
    /// # Errors
    ///
    /// Returns the decoder's [`ConditionError`].
    pub fn resolve_condition(
        &mut self,
        decoder: &ConditionDecoder,
    ) -> Result<&ConditionTree, ConditionError> {
        self.resolved_condition = decoder.decode(self.condition.as_ref())?;
        Ok(&self.resolved_condition)
    }
}
