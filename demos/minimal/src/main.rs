// demos/minimal/src/main.rs
// ============================================================================
// Module: Action Guard Minimal Demo
// Description: Minimal end-to-end gating run over one shared guard instance.
// Purpose: Demonstrate registration, deferred votes, and outcome aggregation.
// Dependencies: action-guard-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! Registers a constant policy, an argument-inspecting closure, and a
//! deferred background check against one action, then evaluates two requests
//! and reports the verdicts.

use std::error::Error;
use std::io;
use std::io::Write;
use std::time::Duration;

use action_guard_core::ActionGuard;
use action_guard_core::Callback;
use action_guard_core::DeferredVote;
use action_guard_core::Reply;
use serde_json::json;

/// Runs the demo scenario end to end.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let guard = ActionGuard::new();
    let mut stdout = io::stdout().lock();

    // A fixed allow policy.
    guard.respond_to("publish", true, None)?;

    // A closure voting on the first argument: drafts need a non-empty name.
    guard.respond_to(
        "publish",
        Callback::from_fn(|_context, args| {
            let named =
                args.first().and_then(|value| value.as_str()).is_some_and(|name| !name.is_empty());
            Reply::Bool(named)
        }),
        None,
    )?;

    // A deferred vote settled by a background check.
    guard.respond_to(
        "publish",
        Callback::from_fn(|_context, _args| {
            Reply::Deferred(DeferredVote::from_future(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                true
            }))
        }),
        None,
    )?;

    for draft in ["draft-1", ""] {
        let outcome = guard.if_i_can("publish", &[json!(draft)])?;
        match outcome.await {
            Ok(()) => writeln!(stdout, "publish '{draft}': granted")?,
            Err(denied) => writeln!(stdout, "publish '{draft}': {denied}")?,
        }
    }

    Ok(())
}
