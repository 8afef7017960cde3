// crates/ontology-rules-core/src/condition/operator.rs
// ============================================================================
// Module: Condition Operator Catalog
// Description: Closed operator set and per-operator value/name contracts.
// Purpose: Single source of truth for what each condition operator accepts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every condition node is tagged with an [`Operator`]. The operator fixes the
//! shape of the node's `value` ([`ValueArity`]) and whether a field name must
//! be supplied ([`NameRequirement`]). The table is a `const` match, so adding a
//! variant without a contract is a compile error rather than a runtime gap.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::condition::error::ConditionError;
use crate::condition::tree::NodePath;

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Shape constraint an operator places on a node's `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueArity {
    /// No value is inspected; combinators carry sub-conditions instead.
    None,
    /// A single non-array value.
    Scalar,
    /// An array of exactly two elements (interval bounds).
    Pair,
    /// An array with at least one element.
    NonEmptyArray,
    /// A string value.
    StringOnly,
}

/// Whether an operator needs a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameRequirement {
    /// Field name must be non-empty.
    Required,
    /// Field name is not used by the operator. Advisory; never rejected.
    Forbidden,
    /// Field name may be supplied or omitted.
    Optional,
}

/// Value and naming contract for a single operator.
///
/// # Invariants
/// - Contracts are static; see [`Operator::contract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorContract {
    /// Value shape accepted by the operator.
    pub arity: ValueArity,
    /// Field name requirement for the operator.
    pub name: NameRequirement,
}

impl OperatorContract {
    /// Creates a contract from its parts.
    #[must_use]
    pub const fn new(arity: ValueArity, name: NameRequirement) -> Self {
        Self {
            arity,
            name,
        }
    }
}

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Condition operator.
///
/// Serializes as the canonical wire tag; the short design-document spellings
/// are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equality.
    #[serde(rename = "==", alias = "eq")]
    Eq,
    /// Inequality.
    #[serde(rename = "!=", alias = "noteq", alias = "not_eq")]
    NotEq,
    /// Greater than.
    #[serde(rename = ">", alias = "gt")]
    Gt,
    /// Greater than or equal.
    #[serde(rename = ">=", alias = "gte")]
    Gte,
    /// Less than.
    #[serde(rename = "<", alias = "lt")]
    Lt,
    /// Less than or equal.
    #[serde(rename = "<=", alias = "lte")]
    Lte,
    /// Membership in a value list.
    #[serde(rename = "in")]
    In,
    /// Non-membership in a value list.
    #[serde(rename = "not_in", alias = "notin")]
    NotIn,
    /// Inside a `[low, high]` interval.
    #[serde(rename = "range")]
    Range,
    /// Outside a `[low, high]` interval.
    #[serde(rename = "out_range", alias = "outrange")]
    OutRange,
    /// Relative time window before now.
    #[serde(rename = "before")]
    Before,
    /// Between two time points.
    #[serde(rename = "between")]
    Between,
    /// Wildcard text match.
    #[serde(rename = "like")]
    Like,
    /// Negated wildcard text match.
    #[serde(rename = "not_like", alias = "notlike")]
    NotLike,
    /// Text prefix match.
    #[serde(rename = "prefix")]
    Prefix,
    /// Negated text prefix match.
    #[serde(rename = "not_prefix", alias = "notprefix")]
    NotPrefix,
    /// Regular expression match.
    #[serde(rename = "regex")]
    Regex,
    /// Full-text match.
    #[serde(rename = "match")]
    Match,
    /// Full-text phrase match.
    #[serde(rename = "match_phrase", alias = "matchphrase")]
    MatchPhrase,
    /// Full-text match across all searchable fields.
    #[serde(rename = "multi_match", alias = "multimatch")]
    MultiMatch,
    /// Vector proximity search, filtered by sub-conditions.
    #[serde(rename = "knn")]
    Knn,
    /// Contextual comparison against the current period or principal.
    #[serde(rename = "current")]
    Current,
    /// All sub-conditions must hold.
    #[serde(rename = "and")]
    And,
    /// At least one sub-condition must hold.
    #[serde(rename = "or")]
    Or,
}

impl Operator {
    /// Every operator, in catalog order.
    pub const ALL: [Self; 24] = [
        Self::Eq,
        Self::NotEq,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::In,
        Self::NotIn,
        Self::Range,
        Self::OutRange,
        Self::Before,
        Self::Between,
        Self::Like,
        Self::NotLike,
        Self::Prefix,
        Self::NotPrefix,
        Self::Regex,
        Self::Match,
        Self::MatchPhrase,
        Self::MultiMatch,
        Self::Knn,
        Self::Current,
        Self::And,
        Self::Or,
    ];

    /// Returns the value and naming contract for this operator.
    #[must_use]
    pub const fn contract(self) -> OperatorContract {
        use NameRequirement::Forbidden;
        use NameRequirement::Optional;
        use NameRequirement::Required;

        match self {
            Self::Eq
            | Self::NotEq
            | Self::Gt
            | Self::Gte
            | Self::Lt
            | Self::Lte
            | Self::Match
            | Self::MatchPhrase
            | Self::Current => OperatorContract::new(ValueArity::Scalar, Required),
            Self::MultiMatch => OperatorContract::new(ValueArity::Scalar, Forbidden),
            Self::In | Self::NotIn => OperatorContract::new(ValueArity::NonEmptyArray, Required),
            Self::Range | Self::OutRange | Self::Before | Self::Between => {
                OperatorContract::new(ValueArity::Pair, Required)
            }
            Self::Like | Self::NotLike | Self::Prefix | Self::NotPrefix | Self::Regex => {
                OperatorContract::new(ValueArity::StringOnly, Required)
            }
            Self::Knn => OperatorContract::new(ValueArity::None, Optional),
            Self::And | Self::Or => OperatorContract::new(ValueArity::None, Forbidden),
        }
    }

    /// Returns true for operators whose payload is a list of sub-conditions.
    #[must_use]
    pub const fn is_combinator(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Knn)
    }

    /// Returns true when `real_value` may stand in for `value` in the string check.
    #[must_use]
    pub const fn accepts_real_value(self) -> bool {
        matches!(self, Self::Like | Self::NotLike | Self::Prefix | Self::NotPrefix)
    }

    /// Returns the canonical wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Range => "range",
            Self::OutRange => "out_range",
            Self::Before => "before",
            Self::Between => "between",
            Self::Like => "like",
            Self::NotLike => "not_like",
            Self::Prefix => "prefix",
            Self::NotPrefix => "not_prefix",
            Self::Regex => "regex",
            Self::Match => "match",
            Self::MatchPhrase => "match_phrase",
            Self::MultiMatch => "multi_match",
            Self::Knn => "knn",
            Self::Current => "current",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Resolves a wire tag (canonical or alias) to an operator.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let operator = match tag {
            "==" | "eq" => Self::Eq,
            "!=" | "noteq" | "not_eq" => Self::NotEq,
            ">" | "gt" => Self::Gt,
            ">=" | "gte" => Self::Gte,
            "<" | "lt" => Self::Lt,
            "<=" | "lte" => Self::Lte,
            "in" => Self::In,
            "not_in" | "notin" => Self::NotIn,
            "range" => Self::Range,
            "out_range" | "outrange" => Self::OutRange,
            "before" => Self::Before,
            "between" => Self::Between,
            "like" => Self::Like,
            "not_like" | "notlike" => Self::NotLike,
            "prefix" => Self::Prefix,
            "not_prefix" | "notprefix" => Self::NotPrefix,
            "regex" => Self::Regex,
            "match" => Self::Match,
            "match_phrase" | "matchphrase" => Self::MatchPhrase,
            "multi_match" | "multimatch" => Self::MultiMatch,
            "knn" => Self::Knn,
            "current" => Self::Current,
            "and" => Self::And,
            "or" => Self::Or,
            _ => return None,
        };
        Some(operator)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Tag-level lookups over the closed operator set.
///
/// # Invariants
/// - Stateless; the table lives in [`Operator::contract`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorCatalog;

impl OperatorCatalog {
    /// Returns true when `tag` names a known operator.
    #[must_use]
    pub fn is_known(tag: &str) -> bool {
        Operator::from_tag(tag).is_some()
    }

    /// Resolves `tag` to an operator, reporting unknown tags against the root path.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::UnknownOperator`] when `tag` is not in the catalog.
    pub fn resolve(tag: &str) -> Result<Operator, ConditionError> {
        Self::resolve_at(tag, &NodePath::root())
    }

    /// Resolves `tag` to an operator, reporting unknown tags against `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::UnknownOperator`] when `tag` is not in the catalog.
    pub fn resolve_at(tag: &str, path: &NodePath) -> Result<Operator, ConditionError> {
        Operator::from_tag(tag).ok_or_else(|| ConditionError::UnknownOperator {
            path: path.clone(),
            operation: tag.to_string(),
        })
    }

    /// Returns the contract registered for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::UnknownOperator`] when `tag` is not in the catalog.
    pub fn contract_for(tag: &str) -> Result<OperatorContract, ConditionError> {
        Self::resolve(tag).map(Operator::contract)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
