// action-guard-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Gate Evaluator
// Description: Fan-out of responder invocations and classification of replies.
// Purpose: Evaluate one action request into a deferred outcome, failing fast on malformed votes.
// Dependencies: crate::{core, runtime, telemetry}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The evaluator snapshots an action's responder stack and invokes every
//! callback synchronously, in registration order, with the supplied arguments
//! and the bound context applied. Each reply is classified into an immediate
//! or deferred vote; a non-boolean JSON reply aborts the evaluation before
//! later responders run and no outcome is produced. Registration changes made
//! by a responder during evaluation take effect for later calls only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::ActionKey;
use crate::core::DeferredVote;
use crate::core::Reply;
use crate::core::json_type_label;
use crate::runtime::outcome::Outcome;
use crate::runtime::registry::ResponderRegistry;
use crate::telemetry::EvaluationEvent;
use crate::telemetry::EvaluationOutcome;
use crate::telemetry::GuardMetrics;

// ============================================================================
// SECTION: Evaluation Errors
// ============================================================================

/// Classification errors returned synchronously by `if_i_can`.
#[derive(Debug, Error)]
pub enum MalformedVoteError {
    /// Responder reply is neither a deferred vote nor a boolean.
    #[error("vote must be a deferred vote or boolean (got {kind})")]
    NotAVote {
        /// JSON type label of the rejected reply.
        kind: String,
    },
}

// ============================================================================
// SECTION: Gate Evaluator
// ============================================================================

/// Evaluates action requests against the shared responder store.
#[derive(Clone)]
pub struct GateEvaluator {
    /// Shared responder store evaluated against.
    registry: ResponderRegistry,
    /// Telemetry sink receiving one event per evaluation.
    metrics: Arc<dyn GuardMetrics>,
}

impl GateEvaluator {
    /// Creates a new evaluator over the given store and telemetry sink.
    #[must_use]
    pub fn new(registry: ResponderRegistry, metrics: Arc<dyn GuardMetrics>) -> Self {
        Self {
            registry,
            metrics,
        }
    }

    /// Requests permission to perform `action`, fanning out to every responder.
    ///
    /// Returns the aggregate [`Outcome`] synchronously, before any deferred
    /// vote has necessarily settled; the caller awaits it to learn the
    /// verdict. An action with zero responders grants vacuously.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedVoteError`] when a responder replies with a JSON
    /// value that is neither boolean nor deferred. The evaluation aborts
    /// immediately: responders after the offender are not invoked and no
    /// outcome is produced.
    pub fn if_i_can(&self, action: &ActionKey, args: &[Value]) -> Result<Outcome, MalformedVoteError> {
        let stack = self.registry.stack(action);
        let mut deferred: Vec<DeferredVote> = Vec::new();
        let mut immediate = 0usize;
        let mut denied = false;

        for responder in &stack {
            match responder.invoke(args) {
                Reply::Bool(ballot) | Reply::Json(Value::Bool(ballot)) => {
                    immediate += 1;
                    denied |= !ballot;
                }
                Reply::Json(other) => {
                    self.record(action, stack.len(), immediate, deferred.len(), EvaluationOutcome::Malformed);
                    return Err(MalformedVoteError::NotAVote {
                        kind: json_type_label(&other).to_string(),
                    });
                }
                Reply::Deferred(vote) => deferred.push(vote),
            }
        }

        let label = if denied {
            EvaluationOutcome::Denied
        } else if deferred.is_empty() {
            EvaluationOutcome::Granted
        } else {
            EvaluationOutcome::Pending
        };
        self.record(action, stack.len(), immediate, deferred.len(), label);

        Ok(Outcome::aggregate(denied, deferred))
    }

    /// Emits the per-evaluation telemetry event.
    fn record(
        &self,
        action: &ActionKey,
        responders: usize,
        immediate_votes: usize,
        deferred_votes: usize,
        outcome: EvaluationOutcome,
    ) {
        self.metrics.record_evaluation(&EvaluationEvent {
            action: action.clone(),
            responders,
            immediate_votes,
            deferred_votes,
            outcome,
        });
    }
}
