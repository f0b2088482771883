// action-guard-core/src/runtime/guard.rs
// ============================================================================
// Module: Action Guard Facade
// Description: Public instance object wiring the responder store and evaluator.
// Purpose: Expose registration, removal, introspection, and evaluation on one handle.
// Dependencies: crate::{core, interfaces, runtime, telemetry}
// ============================================================================

//! ## Overview
//! [`ActionGuard`] is the registry instance embedding code constructs and
//! passes around. It owns the shared responder store and the evaluator over
//! it; `Clone` yields another handle to the same state, so components that
//! register responders and components that request permission can hold their
//! own clones. There is no ambient singleton.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use crate::core::ActionKey;
use crate::interfaces::Callback;
use crate::interfaces::ContextRef;
use crate::interfaces::IntoCallback;
use crate::interfaces::InvalidResponderError;
use crate::runtime::evaluator::GateEvaluator;
use crate::runtime::evaluator::MalformedVoteError;
use crate::runtime::outcome::Outcome;
use crate::runtime::registry::Responder;
use crate::runtime::registry::ResponderRegistry;
use crate::telemetry::GuardMetrics;
use crate::telemetry::NoopGuardMetrics;

// ============================================================================
// SECTION: Action Guard
// ============================================================================

/// Action-gating registry instance.
///
/// # Invariants
/// - Clones share one registration state.
/// - All state is in-process and dies with the last clone.
#[derive(Clone)]
pub struct ActionGuard {
    /// Shared responder store.
    registry: ResponderRegistry,
    /// Evaluator over the shared store.
    evaluator: GateEvaluator,
}

impl ActionGuard {
    /// Creates a new guard with no configuration and no telemetry sink.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(NoopGuardMetrics))
    }

    /// Creates a new guard reporting evaluation events to the given sink.
    #[must_use]
    pub fn with_metrics(metrics: Arc<dyn GuardMetrics>) -> Self {
        let registry = ResponderRegistry::new();
        let evaluator = GateEvaluator::new(registry.clone(), metrics);
        Self {
            registry,
            evaluator,
        }
    }

    /// Registers a responder for an action.
    ///
    /// Identical registrations accumulate; each must later be removed (or
    /// counted) independently. Keep a clone of the registered [`Callback`] to
    /// identify it on removal.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResponderError`] when the loosely typed responder
    /// form is not invocable; the stack is left unchanged.
    pub fn respond_to(
        &self,
        action: impl Into<ActionKey>,
        responder: impl IntoCallback,
        context: Option<ContextRef>,
    ) -> Result<(), InvalidResponderError> {
        let callback = responder.into_callback()?;
        self.registry.push(action.into(), Responder {
            callback,
            context,
        });
        Ok(())
    }

    /// Deregisters responders for an action. Never fails.
    ///
    /// See [`ResponderRegistry::remove`] for the matching modes; passing a
    /// context without a callback is an explicit no-op.
    pub fn stop_responding(
        &self,
        action: impl Into<ActionKey>,
        callback: Option<&Callback>,
        context: Option<&ContextRef>,
    ) {
        self.registry.remove(&action.into(), callback, context);
    }

    /// Requests permission to perform an action.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedVoteError`] when a responder replies with a value
    /// that is neither boolean nor deferred; no outcome is produced.
    pub fn if_i_can(
        &self,
        action: impl Into<ActionKey>,
        args: &[Value],
    ) -> Result<Outcome, MalformedVoteError> {
        self.evaluator.if_i_can(&action.into(), args)
    }

    /// Returns a snapshot of the action's responder stack (introspection hook).
    #[must_use]
    pub fn stack(&self, action: impl Into<ActionKey>) -> Vec<Responder> {
        self.registry.stack(&action.into())
    }
}

impl Default for ActionGuard {
    fn default() -> Self {
        Self::new()
    }
}
