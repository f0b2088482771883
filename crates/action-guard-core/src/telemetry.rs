// action-guard-core/src/telemetry.rs
// ============================================================================
// Module: Guard Telemetry
// Description: Observability hooks for gate evaluations.
// Purpose: Provide evaluation events and stable labels without hard deps.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for evaluation counters. It
//! is intentionally dependency-light so downstream deployments can plug in
//! Prometheus or OpenTelemetry without redesign. One event is recorded per
//! evaluation, at classification time; deferred settlements are not
//! re-reported. Implementations must not panic and must not block.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ActionKey;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Evaluation outcome classification, as known at classification time.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum EvaluationOutcome {
    /// Every vote granted immediately.
    Granted,
    /// An immediate vote denied.
    Denied,
    /// Deferred votes were still outstanding; the verdict settles later.
    Pending,
    /// A responder replied with a malformed vote and the evaluation aborted.
    Malformed,
}

impl EvaluationOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Pending => "pending",
            Self::Malformed => "malformed",
        }
    }
}

// ============================================================================
// SECTION: Metric Events
// ============================================================================

/// Evaluation metric event payload.
#[derive(Debug, Clone)]
pub struct EvaluationEvent {
    /// Action under evaluation.
    pub action: ActionKey,
    /// Number of responders consulted.
    pub responders: usize,
    /// Votes answered immediately.
    pub immediate_votes: usize,
    /// Votes still pending at classification time.
    pub deferred_votes: usize,
    /// Classification outcome label.
    pub outcome: EvaluationOutcome,
}

// ============================================================================
// SECTION: Metrics Interface
// ============================================================================

/// Sink for evaluation metric events.
pub trait GuardMetrics: Send + Sync {
    /// Records one evaluation event.
    fn record_evaluation(&self, event: &EvaluationEvent);
}

/// Metrics sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGuardMetrics;

impl GuardMetrics for NoopGuardMetrics {
    fn record_evaluation(&self, _event: &EvaluationEvent) {}
}
