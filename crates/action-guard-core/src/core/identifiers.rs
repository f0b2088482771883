// action-guard-core/src/core/identifiers.rs
// ============================================================================
// Module: Action Guard Identifiers
// Description: Canonical opaque identifier for guarded actions.
// Purpose: Provide a strongly typed, serializable action key with a stable string form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the action identifier used throughout Action Guard.
//! Keys are opaque, case-sensitive, and compared by exact match; no
//! normalization is applied and the empty key is legal. Validation, where a
//! domain needs it, belongs at embedding boundaries rather than within this
//! simple wrapper.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Opaque identifier naming a guarded action.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKey(String);

impl ActionKey {
    /// Creates a new action key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ActionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
