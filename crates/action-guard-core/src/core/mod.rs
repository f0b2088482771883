// action-guard-core/src/core/mod.rs
// ============================================================================
// Module: Action Guard Core Types
// Description: Canonical action identifiers, reply values, and deferred votes.
// Purpose: Provide the stable leaf types consumed by the registry and runtime.
// Dependencies: serde, serde_json, tokio::sync
// ============================================================================

//! ## Overview
//! Core types are the vocabulary of the gating protocol: the opaque
//! [`ActionKey`], the [`Reply`] union a responder answers with, and the
//! [`DeferredVote`] / [`VoteHandle`] pair backing asynchronous votes. They
//! carry no policy; aggregation semantics live in the runtime.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod deferred;
pub mod identifiers;
pub mod reply;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use deferred::DeferredVote;
pub use deferred::VoteHandle;
pub use identifiers::ActionKey;
pub use reply::Reply;
pub use reply::json_type_label;
