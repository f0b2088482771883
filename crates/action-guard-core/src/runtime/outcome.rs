// action-guard-core/src/runtime/outcome.rs
// ============================================================================
// Module: Outcome Aggregation
// Description: Fan-in barrier future AND-aggregating all votes for one evaluation.
// Purpose: Resolve a single pass/fail outcome once every vote has settled.
// Dependencies: crate::core::deferred, thiserror
// ============================================================================

//! ## Overview
//! An [`Outcome`] is the single deferred result of one evaluation. It is a
//! barrier over every deferred vote the evaluation collected: each poll
//! drives all unsettled votes, and the outcome resolves only when the last
//! vote has settled — granted when the conjunction of all ballots holds,
//! denied otherwise. Denials carry no payload; the signal is the whole
//! message. A never-settling vote stalls the outcome indefinitely, even when
//! a denial is already known.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use thiserror::Error;

use crate::core::DeferredVote;
use crate::core::deferred::VoteFuture;

// ============================================================================
// SECTION: Denial Signal
// ============================================================================

/// Permission denied signal carried by a settled outcome.
///
/// # Invariants
/// - Payload-free: callers cannot distinguish which vote denied, or why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("permission denied")]
pub struct Denied;

// ============================================================================
// SECTION: Outcome Barrier
// ============================================================================

/// Single deferred pass/fail result of one evaluation.
///
/// # Invariants
/// - Settles exactly once: `Ok(())` when every vote granted, `Err(Denied)`
///   when any vote denied.
/// - Resolution waits for ALL votes to settle; fan-in completion order does
///   not affect the result.
#[must_use = "an outcome settles only while it is being awaited"]
pub struct Outcome {
    /// Unsettled vote slots, cleared as votes settle.
    pending: Vec<Option<VoteFuture>>,
    /// Running conjunction of the ballots settled so far.
    granted: bool,
}

impl Outcome {
    /// Builds the barrier from the immediate conjunction and the pending votes.
    pub(crate) fn aggregate(denied: bool, votes: Vec<DeferredVote>) -> Self {
        Self {
            pending: votes.into_iter().map(|vote| Some(vote.settle())).collect(),
            granted: !denied,
        }
    }
}

impl Future for Outcome {
    type Output = Result<(), Denied>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut settled_all = true;
        for slot in &mut this.pending {
            let Some(vote) = slot else {
                continue;
            };
            match vote.as_mut().poll(cx) {
                Poll::Ready(ballot) => {
                    this.granted &= ballot;
                    *slot = None;
                }
                Poll::Pending => settled_all = false,
            }
        }
        if !settled_all {
            return Poll::Pending;
        }
        if this.granted { Poll::Ready(Ok(())) } else { Poll::Ready(Err(Denied)) }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unsettled = self.pending.iter().filter(|slot| slot.is_some()).count();
        f.debug_struct("Outcome")
            .field("unsettled_votes", &unsettled)
            .field("granted_so_far", &self.granted)
            .finish()
    }
}
