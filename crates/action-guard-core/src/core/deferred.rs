// action-guard-core/src/core/deferred.rs
// ============================================================================
// Module: Deferred Votes
// Description: Split-ownership deferred vote and its settlement handle.
// Purpose: Represent a yes/no vote whose value becomes known later, settled exactly once.
// Dependencies: tokio::sync::oneshot
// ============================================================================

//! ## Overview
//! A [`DeferredVote`] is a vote a responder cannot answer immediately. It is
//! created either as a pair with a [`VoteHandle`] (the responder keeps the
//! handle and calls [`VoteHandle::grant`] or [`VoteHandle::deny`] once), or
//! from an arbitrary future yielding a boolean ballot. A handle dropped
//! without settling counts as a denial, so incomplete responders fail closed;
//! only a handle that is kept alive and never used stalls the outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::oneshot;

// ============================================================================
// SECTION: Vote Future
// ============================================================================

/// Boxed future yielding a settled boolean ballot.
pub(crate) type VoteFuture = Pin<Box<dyn Future<Output = bool> + Send>>;

// ============================================================================
// SECTION: Deferred Vote
// ============================================================================

/// A vote settled after the responder has already returned.
///
/// # Invariants
/// - Settles exactly once, to grant (`true`) or deny (`false`).
/// - A [`VoteHandle`] dropped without settling settles the vote as a denial.
#[must_use]
pub struct DeferredVote {
    /// Pending settlement signal.
    inner: VoteInner,
}

/// Settlement sources backing a deferred vote.
enum VoteInner {
    /// Vote settled through the paired [`VoteHandle`].
    Channel(oneshot::Receiver<bool>),
    /// Vote computed by an arbitrary future.
    Future(VoteFuture),
}

impl DeferredVote {
    /// Creates a handle/vote pair; the handle side settles the vote exactly once.
    #[must_use]
    pub fn pair() -> (VoteHandle, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            VoteHandle {
                sender,
            },
            Self {
                inner: VoteInner::Channel(receiver),
            },
        )
    }

    /// Wraps a future as a deferred vote.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = bool> + Send + 'static,
    {
        Self {
            inner: VoteInner::Future(Box::pin(future)),
        }
    }

    /// Converts the vote into a future that yields the settled ballot.
    ///
    /// A dropped settlement handle yields `false` (fail closed).
    pub(crate) fn settle(self) -> VoteFuture {
        match self.inner {
            VoteInner::Channel(receiver) => {
                Box::pin(async move { receiver.await.unwrap_or(false) })
            }
            VoteInner::Future(future) => future,
        }
    }
}

impl fmt::Debug for DeferredVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            VoteInner::Channel(_) => f.write_str("DeferredVote(channel)"),
            VoteInner::Future(_) => f.write_str("DeferredVote(future)"),
        }
    }
}

// ============================================================================
// SECTION: Vote Handle
// ============================================================================

/// Settlement handle for the paired [`DeferredVote`].
///
/// # Invariants
/// - Consumed on settlement; a vote cannot be settled twice.
#[derive(Debug)]
pub struct VoteHandle {
    /// Channel carrying the ballot to the vote side.
    sender: oneshot::Sender<bool>,
}

impl VoteHandle {
    /// Settles the vote as granted.
    pub fn grant(self) {
        // The vote side may already be gone; a ballot nobody awaits is fine.
        let _ = self.sender.send(true);
    }

    /// Settles the vote as denied.
    pub fn deny(self) {
        let _ = self.sender.send(false);
    }
}
