// crates/action-guard-core/tests/registry.rs
// ============================================================================
// Module: Responder Registry Tests
// Description: Tests for stack creation, registration, and removal modes.
// ============================================================================
//! ## Overview
//! Validates lazy stack creation, accumulation of identical registrations,
//! and the identity-matched removal modes.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic registrations.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::sync::Arc;

use action_guard_core::ActionGuard;
use action_guard_core::Callback;
use action_guard_core::ContextRef;
use action_guard_core::Reply;
use serde_json::json;

/// Builds a fresh responder callback with its own identity.
fn noop_callback() -> Callback {
    Callback::from_fn(|_context, _args| Reply::Bool(true))
}

// ============================================================================
// SECTION: Stack Creation
// ============================================================================

#[test]
fn test_stack_created_empty_for_unknown_action() {
    let guard = ActionGuard::new();
    assert!(guard.stack("save").is_empty());
}

#[test]
fn test_action_keys_are_case_sensitive() {
    let guard = ActionGuard::new();
    guard.respond_to("save", noop_callback(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 1);
    assert!(guard.stack("Save").is_empty());
}

// ============================================================================
// SECTION: Registration
// ============================================================================

#[test]
fn test_respond_to_appends_responder() {
    let guard = ActionGuard::new();
    guard.respond_to("save", noop_callback(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 1);
    guard.respond_to("save", noop_callback(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 2);
}

#[test]
fn test_duplicate_registrations_accumulate() {
    let guard = ActionGuard::new();
    let callback = noop_callback();
    guard.respond_to("save", callback.clone(), None).unwrap();
    guard.respond_to("save", callback.clone(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 2);
}

#[test]
fn test_non_invocable_json_is_rejected() {
    let guard = ActionGuard::new();

    let err = guard.respond_to("save", json!("abc"), None).unwrap_err();
    assert!(err.to_string().contains("string"));
    guard.respond_to("save", json!(42), None).unwrap_err();
    guard.respond_to("save", json!({}), None).unwrap_err();
    guard.respond_to("save", json!(null), None).unwrap_err();

    assert!(guard.stack("save").is_empty());
}

#[test]
fn test_json_boolean_registers_constant_responder() {
    let guard = ActionGuard::new();
    guard.respond_to("save", json!(true), None).unwrap();
    guard.respond_to("save", json!(false), None).unwrap();
    assert_eq!(guard.stack("save").len(), 2);
}

// ============================================================================
// SECTION: Removal Modes
// ============================================================================

#[test]
fn test_stop_responding_without_callback_clears_stack() {
    let guard = ActionGuard::new();
    guard.respond_to("save", noop_callback(), None).unwrap();
    guard.respond_to("save", noop_callback(), None).unwrap();
    guard.respond_to("save", noop_callback(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 3);

    guard.stop_responding("save", None, None);

    assert!(guard.stack("save").is_empty());
}

#[test]
fn test_cleared_action_recreates_fresh_stack() {
    let guard = ActionGuard::new();
    guard.respond_to("save", noop_callback(), None).unwrap();
    guard.stop_responding("save", None, None);

    assert!(guard.stack("save").is_empty());
    guard.respond_to("save", noop_callback(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 1);
}

#[test]
fn test_stop_responding_removes_all_matching_callbacks() {
    let guard = ActionGuard::new();
    let callback = noop_callback();
    guard.respond_to("save", callback.clone(), None).unwrap();
    guard.respond_to("save", callback.clone(), None).unwrap();
    guard.respond_to("save", noop_callback(), None).unwrap();
    assert_eq!(guard.stack("save").len(), 3);

    guard.stop_responding("save", Some(&callback), None);

    let stack = guard.stack("save");
    assert_eq!(stack.len(), 1);
    assert!(!stack[0].callback.ptr_eq(&callback));
}

#[test]
fn test_stop_responding_matches_callback_and_context() {
    let guard = ActionGuard::new();
    let f = noop_callback();
    let g = noop_callback();
    let doctor: ContextRef = Arc::new("doctor".to_string());
    let rose: ContextRef = Arc::new("rose".to_string());

    guard.respond_to("save", f.clone(), Some(Arc::clone(&doctor))).unwrap();
    guard.respond_to("save", g.clone(), Some(Arc::clone(&doctor))).unwrap();
    guard.respond_to("save", f.clone(), Some(Arc::clone(&rose))).unwrap();
    assert_eq!(guard.stack("save").len(), 3);

    guard.stop_responding("save", Some(&f), Some(&doctor));

    let stack = guard.stack("save");
    assert_eq!(stack.len(), 2);
    assert!(stack[0].callback.ptr_eq(&g));
    assert!(stack[1].callback.ptr_eq(&f));
}

#[test]
fn test_removal_without_context_ignores_context() {
    let guard = ActionGuard::new();
    let f = noop_callback();
    let g = noop_callback();
    let doctor: ContextRef = Arc::new("doctor".to_string());

    guard.respond_to("save", f.clone(), Some(Arc::clone(&doctor))).unwrap();
    guard.respond_to("save", f.clone(), None).unwrap();
    guard.respond_to("save", g.clone(), Some(doctor)).unwrap();

    guard.stop_responding("save", Some(&f), None);

    let stack = guard.stack("save");
    assert_eq!(stack.len(), 1);
    assert!(stack[0].callback.ptr_eq(&g));
}

#[test]
fn test_context_without_callback_is_noop() {
    let guard = ActionGuard::new();
    let doctor: ContextRef = Arc::new("doctor".to_string());
    guard.respond_to("save", noop_callback(), Some(Arc::clone(&doctor))).unwrap();
    guard.respond_to("save", noop_callback(), None).unwrap();

    guard.stop_responding("save", None, Some(&doctor));

    assert_eq!(guard.stack("save").len(), 2);
}

#[test]
fn test_stop_responding_on_unknown_action_is_noop() {
    let guard = ActionGuard::new();
    guard.stop_responding("save", None, None);
    guard.stop_responding("save", Some(&noop_callback()), None);
    assert!(guard.stack("save").is_empty());
}
