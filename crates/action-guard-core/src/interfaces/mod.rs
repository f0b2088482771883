// action-guard-core/src/interfaces/mod.rs
// ============================================================================
// Module: Action Guard Interfaces
// Description: The responder contract surface and its registration seams.
// Purpose: Define how embedding code supplies callbacks, contexts, and loose registrations.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how embedding applications plug responders into the
//! registry without the registry knowing their concrete types. Callbacks and
//! contexts are shared handles compared by pointer identity, which is what
//! selective removal keys on. The loosely typed [`IntoCallback`] seam is where
//! the "responder must be invocable" check remains a runtime check; closure
//! registration is validated by the type system instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::Reply;
use crate::core::json_type_label;

// ============================================================================
// SECTION: Context Binding
// ============================================================================

/// Opaque receiver value bound to a responder.
///
/// The evaluator applies the receiver explicitly on invocation; callbacks
/// downcast it to their concrete type when they need it.
pub type ContextValue = dyn Any + Send + Sync;

/// Shared handle to a responder context, compared by pointer identity.
pub type ContextRef = Arc<ContextValue>;

// ============================================================================
// SECTION: Responder Contract
// ============================================================================

/// Callback invoked when an action requests permission.
pub trait RespondFn: Send + Sync {
    /// Answers an evaluation, given the bound context and the call arguments.
    fn call(&self, context: Option<&ContextValue>, args: &[Value]) -> Reply;
}

impl<F> RespondFn for F
where
    F: Fn(Option<&ContextValue>, &[Value]) -> Reply + Send + Sync,
{
    fn call(&self, context: Option<&ContextValue>, args: &[Value]) -> Reply {
        self(context, args)
    }
}

/// Shared handle to a responder callback.
///
/// # Invariants
/// - Clones share one underlying callback; identity is pointer equality, so a
///   clone of the handle used at registration identifies it for removal.
#[derive(Clone)]
pub struct Callback {
    /// Shared callback implementation.
    inner: Arc<dyn RespondFn>,
}

impl Callback {
    /// Wraps a closure as a responder callback.
    #[must_use]
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(Option<&ContextValue>, &[Value]) -> Reply + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(callback),
        }
    }

    /// Builds a responder that always answers with the same ballot.
    #[must_use]
    pub fn constant(ballot: bool) -> Self {
        Self::from_fn(move |_context, _args| Reply::Bool(ballot))
    }

    /// Invokes the callback with the given context and arguments.
    pub fn call(&self, context: Option<&ContextValue>, args: &[Value]) -> Reply {
        self.inner.call(context, args)
    }

    /// Returns true when both handles share the same underlying callback.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Registration Errors
// ============================================================================

/// Registration errors returned by `respond_to`.
#[derive(Debug, Error)]
pub enum InvalidResponderError {
    /// Responder value cannot be invoked as a callback.
    #[error("responder must be a callback or boolean (got {kind})")]
    NotInvocable {
        /// JSON type label of the rejected value.
        kind: String,
    },
}

// ============================================================================
// SECTION: Loose Registration
// ============================================================================

/// Conversion of a registration value into a responder callback.
///
/// Closures and [`Callback`] handles are invocable by construction. Loosely
/// typed JSON registrations (constants lifted from configuration or remote
/// descriptors) are inspected here: a JSON boolean becomes a constant
/// responder, anything else is rejected.
pub trait IntoCallback {
    /// Converts the value into a responder callback.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResponderError`] when the value is not invocable.
    fn into_callback(self) -> Result<Callback, InvalidResponderError>;
}

impl IntoCallback for Callback {
    fn into_callback(self) -> Result<Callback, InvalidResponderError> {
        Ok(self)
    }
}

impl IntoCallback for bool {
    fn into_callback(self) -> Result<Callback, InvalidResponderError> {
        Ok(Callback::constant(self))
    }
}

impl IntoCallback for Value {
    fn into_callback(self) -> Result<Callback, InvalidResponderError> {
        match self {
            Self::Bool(ballot) => Ok(Callback::constant(ballot)),
            other => Err(InvalidResponderError::NotInvocable {
                kind: json_type_label(&other).to_string(),
            }),
        }
    }
}
