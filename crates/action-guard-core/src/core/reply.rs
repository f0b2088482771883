// action-guard-core/src/core/reply.rs
// ============================================================================
// Module: Responder Replies
// Description: Tagged union of values a responder callback may answer with.
// Purpose: Normalize immediate, deferred, and loosely typed replies for classification.
// Dependencies: serde_json, crate::core::deferred
// ============================================================================

//! ## Overview
//! A responder answers an evaluation with a [`Reply`]: an immediate boolean
//! ballot, a [`DeferredVote`] settled later, or a loosely typed JSON value
//! from bridged responders (remote hooks, scripted policies). JSON replies
//! are inspected at the evaluation boundary; only JSON booleans count as
//! votes, anything else is a malformed vote.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::deferred::DeferredVote;

// ============================================================================
// SECTION: Reply Union
// ============================================================================

/// Value a responder callback answers an evaluation with.
///
/// # Invariants
/// - `Json` replies are classified at the evaluation boundary; non-boolean
///   JSON values abort the evaluation as malformed votes.
#[derive(Debug)]
pub enum Reply {
    /// Immediate boolean ballot.
    Bool(bool),
    /// Vote settled later by the responder.
    Deferred(DeferredVote),
    /// Loosely typed reply inspected at the evaluation boundary.
    Json(Value),
}

impl From<bool> for Reply {
    fn from(ballot: bool) -> Self {
        Self::Bool(ballot)
    }
}

impl From<DeferredVote> for Reply {
    fn from(vote: DeferredVote) -> Self {
        Self::Deferred(vote)
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

// ============================================================================
// SECTION: JSON Type Labels
// ============================================================================

/// Returns a stable label for a JSON value's type, used in diagnostics.
#[must_use]
pub const fn json_type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
