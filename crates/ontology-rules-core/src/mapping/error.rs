// crates/ontology-rules-core/src/mapping/error.rs
// ============================================================================
// Module: Mapping Rule Errors
// Description: Failures raised while validating relation mapping rules.
// Purpose: Name the offending rule list and index for each violation.
// Dependencies: crate::mapping::rules, thiserror
// ============================================================================

//! ## Overview
//! Every [`MappingError`] names one violation. Per-pair variants carry the
//! [`RuleSet`] they were found in and the zero-based pair index, so a
//! view-backed failure reads as `source-to-bridge rule [2]: ...`.

use std::fmt;

use thiserror::Error;

use crate::mapping::rules::RelationKind;

/// Rule list a per-pair error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    /// The single list of a direct relation.
    Direct,
    /// Source field to view field pairs of a view-backed relation.
    SourceToBridge,
    /// View field to target field pairs of a view-backed relation.
    BridgeToTarget,
}

impl RuleSet {
    /// Returns a stable label for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "mapping",
            Self::SourceToBridge => "source-to-bridge",
            Self::BridgeToTarget => "bridge-to-target",
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping rule validation error.
///
/// # Invariants
/// - Variants are stable for error classification; see [`MappingError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Relation kind is blank.
    #[error("relation type is required")]
    MissingRelationKind,
    /// Relation kind is not `direct` or `data_view`.
    #[error("relation type '{kind}' is not supported")]
    UnsupportedRelationKind {
        /// Kind as supplied.
        kind: String,
    },
    /// Mapping payload is absent.
    #[error("mapping rules are required")]
    MissingMappingRules,
    /// Payload does not match the shape of the relation kind.
    #[error("{kind} mapping rules could not be decoded: {detail}")]
    DecodeError {
        /// Relation kind the payload was decoded as.
        kind: RelationKind,
        /// Decoder diagnostic.
        detail: String,
    },
    /// Direct mapping has no pairs.
    #[error("mapping rules must contain at least 1 rule")]
    EmptyMappingRules,
    /// Pair has a blank source field.
    #[error("{rules} rule [{index}]: source property name is empty")]
    EmptySourceField {
        /// Rule list.
        rules: RuleSet,
        /// Pair index.
        index: usize,
    },
    /// Pair has a blank target field.
    #[error("{rules} rule [{index}]: target property name is empty")]
    EmptyTargetField {
        /// Rule list.
        rules: RuleSet,
        /// Pair index.
        index: usize,
    },
    /// Pair repeats an earlier pair in the same list.
    #[error(
        "{rules} rule [{index}]: mapping ({source_field}, {target_field}) duplicates rule \
         [{first_index}]"
    )]
    DuplicateMappingPair {
        /// Rule list.
        rules: RuleSet,
        /// Index of the repeated pair.
        index: usize,
        /// Index where the pair first appeared.
        first_index: usize,
        /// Source field name.
        source_field: String,
        /// Target field name.
        target_field: String,
    },
    /// View-backed mapping has no backing data source.
    #[error("backing_data_source is required")]
    MissingBridgingSource,
    /// Backing data source has no type.
    #[error("backing_data_source.type is required")]
    MissingBridgingKind,
    /// Backing data source type is not `data_view`.
    #[error("backing_data_source.type '{kind}' is not supported, expected 'data_view'")]
    InvalidBridgingKind {
        /// Kind as supplied.
        kind: String,
    },
    /// Backing data source has no id.
    #[error("backing_data_source.id is required")]
    MissingBridgingId,
    /// View-backed mapping has no source-to-bridge pairs.
    #[error("source_mapping_rules must contain at least 1 rule")]
    EmptySourceRules,
    /// View-backed mapping has no bridge-to-target pairs.
    #[error("target_mapping_rules must contain at least 1 rule")]
    EmptyTargetRules,
    /// Rule list exceeds the configured maximum.
    #[error("{rules} rules count {actual} exceeds {max}")]
    TooManyMappingRules {
        /// Rule list.
        rules: RuleSet,
        /// Configured limit.
        max: usize,
        /// Supplied count.
        actual: usize,
    },
}

impl MappingError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingRelationKind => "missing_relation_kind",
            Self::UnsupportedRelationKind {
                ..
            } => "unsupported_relation_kind",
            Self::MissingMappingRules => "missing_mapping_rules",
            Self::DecodeError {
                ..
            } => "decode_error",
            Self::EmptyMappingRules => "empty_mapping_rules",
            Self::EmptySourceField {
                ..
            } => "empty_source_field",
            Self::EmptyTargetField {
                ..
            } => "empty_target_field",
            Self::DuplicateMappingPair {
                ..
            } => "duplicate_mapping_pair",
            Self::MissingBridgingSource => "missing_bridging_source",
            Self::MissingBridgingKind => "missing_bridging_kind",
            Self::InvalidBridgingKind {
                ..
            } => "invalid_bridging_kind",
            Self::MissingBridgingId => "missing_bridging_id",
            Self::EmptySourceRules => "empty_source_rules",
            Self::EmptyTargetRules => "empty_target_rules",
            Self::TooManyMappingRules {
                ..
            } => "too_many_mapping_rules",
        }
    }
}
