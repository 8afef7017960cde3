// crates/ontology-rules-core/src/mapping/rules.rs
// ============================================================================
// Module: Relation Mapping Rules
// Description: Wire types for direct and data-view-backed relation mappings.
// Purpose: Give the mapping validator typed shapes to decode into.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A relation joins a source object type to a target object type. A `direct`
//! relation maps source fields straight onto target fields. A `data_view`
//! relation goes through an intermediate view: source fields map onto view
//! fields, and view fields map onto target fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Wire tag for direct relations.
pub const RELATION_KIND_DIRECT: &str = "direct";
/// Wire tag for view-backed relations; also the only accepted bridging kind.
pub const RELATION_KIND_DATA_VIEW: &str = "data_view";

// ============================================================================
// SECTION: Relation Kinds
// ============================================================================

/// Relation discriminator selecting the mapping shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Field-to-field mapping between source and target.
    Direct,
    /// Two-hop mapping through a data view.
    DataView,
}

impl RelationKind {
    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => RELATION_KIND_DIRECT,
            Self::DataView => RELATION_KIND_DATA_VIEW,
        }
    }

    /// Parses a wire tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            RELATION_KIND_DIRECT => Some(Self::Direct),
            RELATION_KIND_DATA_VIEW => Some(Self::DataView),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Rule Entries
// ============================================================================

/// Reference to a property by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SimpleProperty {
    /// Property name.
    #[serde(default)]
    pub name: String,
    /// Display name filled in by the persistence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl SimpleProperty {
    /// Creates a property reference by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }
}

/// One `(source, target)` field pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Field on the source side of the hop.
    #[serde(default)]
    pub source_property: SimpleProperty,
    /// Field on the target side of the hop.
    #[serde(default)]
    pub target_property: SimpleProperty,
}

impl PropertyMapping {
    /// Creates a pair from two field names.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_property: SimpleProperty::named(source),
            target_property: SimpleProperty::named(target),
        }
    }
}

// ============================================================================
// SECTION: View-Backed Mapping
// ============================================================================

/// Intermediate data source bridging a view-backed relation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackingDataSource {
    /// Bridging source kind; must be `data_view`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Data view identifier.
    #[serde(default)]
    pub id: String,
    /// Display name filled in by the persistence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Two-hop mapping through a data view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndirectMapping {
    /// View that bridges source and target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_data_source: Option<BackingDataSource>,
    /// Source field to view field pairs.
    #[serde(default)]
    pub source_mapping_rules: Vec<PropertyMapping>,
    /// View field to target field pairs.
    #[serde(default)]
    pub target_mapping_rules: Vec<PropertyMapping>,
}

// ============================================================================
// SECTION: Validated Rules
// ============================================================================

/// Validated mapping rules, tagged by relation kind.
///
/// Serializes to the same untagged wire shape it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MappingRules {
    /// Rules of a direct relation.
    Direct(Vec<PropertyMapping>),
    /// Rules of a view-backed relation.
    DataView(IndirectMapping),
}

impl MappingRules {
    /// Returns the relation kind these rules belong to.
    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        match self {
            Self::Direct(_) => RelationKind::Direct,
            Self::DataView(_) => RelationKind::DataView,
        }
    }

    /// Total number of field pairs across every hop.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        match self {
            Self::Direct(rules) => rules.len(),
            Self::DataView(mapping) => {
                mapping.source_mapping_rules.len() + mapping.target_mapping_rules.len()
            }
        }
    }
}
