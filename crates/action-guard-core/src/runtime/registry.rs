// action-guard-core/src/runtime/registry.rs
// ============================================================================
// Module: Responder Registry
// Description: Per-action insertion-ordered stacks of registered responders.
// Purpose: Support lazy stack creation, appends, and identity-matched removal.
// Dependencies: crate::{core, interfaces}, std::sync
// ============================================================================

//! ## Overview
//! The registry holds one insertion-ordered responder stack per action key.
//! Stacks are created lazily on first access (read or write) and persist as
//! empty sequences once touched; only whole-stack removal deletes the entry,
//! after which the next access recreates it fresh. Clones of the registry
//! share state, so a guard handle can be passed to whichever components need
//! to register or query responders.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use serde_json::Value;

use crate::core::ActionKey;
use crate::core::Reply;
use crate::interfaces::Callback;
use crate::interfaces::ContextRef;

// ============================================================================
// SECTION: Responder Record
// ============================================================================

/// Registered voter for one action: a callback plus an optional bound context.
///
/// # Invariants
/// - Two responders are equal for removal purposes iff their callbacks are
///   pointer-identical and, when a context is supplied to the removal call,
///   their contexts are pointer-identical too.
#[derive(Clone)]
pub struct Responder {
    /// Callback invoked on evaluation.
    pub callback: Callback,
    /// Optional receiver applied to the callback on invocation.
    pub context: Option<ContextRef>,
}

impl Responder {
    /// Invokes the callback with the bound context applied.
    pub fn invoke(&self, args: &[Value]) -> Reply {
        self.callback.call(self.context.as_deref(), args)
    }

    /// Returns true when this entry matches the removal criteria.
    fn matches(&self, callback: &Callback, context: Option<&ContextRef>) -> bool {
        if !self.callback.ptr_eq(callback) {
            return false;
        }
        context.is_none_or(|wanted| {
            self.context.as_ref().is_some_and(|bound| Arc::ptr_eq(bound, wanted))
        })
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder").field("bound", &self.context.is_some()).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Responder Registry
// ============================================================================

/// Responder stacks keyed by action.
type StackMap = BTreeMap<ActionKey, Vec<Responder>>;

/// Shared store of per-action responder stacks.
///
/// # Invariants
/// - Stacks preserve registration (insertion) order.
/// - Identical registrations accumulate; no de-duplication is applied.
/// - Clones share one underlying map.
#[derive(Clone, Default)]
pub struct ResponderRegistry {
    /// Stack map shared across clones.
    stacks: Arc<Mutex<StackMap>>,
}

impl ResponderRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the action's stack, creating an empty one if absent.
    ///
    /// Mutations of the snapshot do not affect the registry.
    #[must_use]
    pub fn stack(&self, action: &ActionKey) -> Vec<Responder> {
        let mut stacks = self.lock();
        stacks.entry(action.clone()).or_default().clone()
    }

    /// Appends a responder to the action's stack, creating the stack if needed.
    pub fn push(&self, action: ActionKey, responder: Responder) {
        self.lock().entry(action).or_default().push(responder);
    }

    /// Removes responders from the action's stack.
    ///
    /// With both callback and context, every entry matching both identities is
    /// removed; with a callback alone, every entry with that callback is
    /// removed regardless of context. With neither, the action's entry is
    /// deleted from the map entirely and the next access recreates it fresh.
    /// A context without a callback is not a supported removal mode and is a
    /// no-op. An empty or absent stack is always a no-op.
    pub fn remove(
        &self,
        action: &ActionKey,
        callback: Option<&Callback>,
        context: Option<&ContextRef>,
    ) {
        let mut stacks = self.lock();
        let Some(stack) = stacks.get_mut(action) else {
            return;
        };
        if stack.is_empty() {
            return;
        }
        match callback {
            Some(callback) => {
                stack.retain(|responder| !responder.matches(callback, context));
            }
            None if context.is_some() => {}
            None => {
                stacks.remove(action);
            }
        }
    }

    /// Locks the stack map, adopting the inner data if a panic poisoned the lock.
    fn lock(&self) -> MutexGuard<'_, StackMap> {
        self.stacks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ResponderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stacks = self.lock();
        f.debug_struct("ResponderRegistry").field("actions", &stacks.len()).finish_non_exhaustive()
    }
}
