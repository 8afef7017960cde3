// crates/ontology-rules-config/src/lib.rs
// ============================================================================
// Module: Ontology Rules Config Library
// Description: Canonical config model and validation for rule limits.
// Purpose: Single source of truth for ontology-rules.toml semantics.
// Dependencies: ontology-rules-core, serde, toml
// ============================================================================

//! ## Overview
//! `ontology-rules-config` loads the structural limits applied by the
//! condition and mapping validators. Loading is strict and fail-closed: bad
//! paths, oversized files, non-UTF-8 content, and out-of-range limits are all
//! rejected.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
