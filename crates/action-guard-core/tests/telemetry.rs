// crates/action-guard-core/tests/telemetry.rs
// ============================================================================
// Module: Guard Telemetry Tests
// Description: Tests for per-evaluation metric events and stable labels.
// ============================================================================
//! ## Overview
//! Validates that exactly one event is recorded per evaluation, labeled with
//! the classification-time outcome.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic evaluations.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use action_guard_core::ActionGuard;
use action_guard_core::Callback;
use action_guard_core::DeferredVote;
use action_guard_core::EvaluationEvent;
use action_guard_core::EvaluationOutcome;
use action_guard_core::GuardMetrics;
use action_guard_core::Reply;
use serde_json::json;

/// Metrics sink capturing every recorded event.
#[derive(Default)]
struct RecordingMetrics {
    /// Recorded events, in order.
    events: Mutex<Vec<EvaluationEvent>>,
}

impl GuardMetrics for RecordingMetrics {
    fn record_evaluation(&self, event: &EvaluationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Builds a guard wired to a recording sink.
fn recording_guard() -> (ActionGuard, Arc<RecordingMetrics>) {
    let metrics = Arc::new(RecordingMetrics::default());
    let guard = ActionGuard::with_metrics(Arc::clone(&metrics) as Arc<dyn GuardMetrics>);
    (guard, metrics)
}

// ============================================================================
// SECTION: Event Recording
// ============================================================================

#[test]
fn test_granted_event_counts_votes() {
    let (guard, metrics) = recording_guard();
    guard.respond_to("save", true, None).unwrap();
    guard.respond_to("save", true, None).unwrap();

    let _outcome = guard.if_i_can("save", &[]).unwrap();

    let events = metrics.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action.as_str(), "save");
    assert_eq!(events[0].responders, 2);
    assert_eq!(events[0].immediate_votes, 2);
    assert_eq!(events[0].deferred_votes, 0);
    assert_eq!(events[0].outcome, EvaluationOutcome::Granted);
}

#[test]
fn test_denied_event_label() {
    let (guard, metrics) = recording_guard();
    guard.respond_to("save", false, None).unwrap();

    let _outcome = guard.if_i_can("save", &[]).unwrap();

    let events = metrics.events.lock().unwrap();
    assert_eq!(events[0].outcome, EvaluationOutcome::Denied);
}

#[test]
fn test_pending_event_counts_deferred_votes() {
    let (guard, metrics) = recording_guard();
    guard.respond_to("save", true, None).unwrap();
    guard
        .respond_to(
            "save",
            Callback::from_fn(|_context, _args| {
                Reply::Deferred(DeferredVote::from_future(async {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    true
                }))
            }),
            None,
        )
        .unwrap();

    let _outcome = guard.if_i_can("save", &[]).unwrap();

    let events = metrics.events.lock().unwrap();
    assert_eq!(events[0].immediate_votes, 1);
    assert_eq!(events[0].deferred_votes, 1);
    assert_eq!(events[0].outcome, EvaluationOutcome::Pending);
}

#[test]
fn test_malformed_abort_is_recorded() {
    let (guard, metrics) = recording_guard();
    guard
        .respond_to("save", Callback::from_fn(|_context, _args| Reply::Json(json!(7))), None)
        .unwrap();

    guard.if_i_can("save", &[]).unwrap_err();

    let events = metrics.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, EvaluationOutcome::Malformed);
}

#[test]
fn test_vacuous_evaluation_is_recorded() {
    let (guard, metrics) = recording_guard();
    let _outcome = guard.if_i_can("save", &[]).unwrap();

    let events = metrics.events.lock().unwrap();
    assert_eq!(events[0].responders, 0);
    assert_eq!(events[0].outcome, EvaluationOutcome::Granted);
}

// ============================================================================
// SECTION: Labels
// ============================================================================

#[test]
fn test_outcome_labels_are_stable() {
    assert_eq!(EvaluationOutcome::Granted.as_str(), "granted");
    assert_eq!(EvaluationOutcome::Denied.as_str(), "denied");
    assert_eq!(EvaluationOutcome::Pending.as_str(), "pending");
    assert_eq!(EvaluationOutcome::Malformed.as_str(), "malformed");
}
