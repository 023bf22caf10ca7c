//! Cached read models of the backend's cases and documents, plus the
//! mutation dispatch that keeps them in sync. Collections are replaced
//! wholesale by each successful fetch, never merged.

mod cases;
mod documents;
mod invalidation;

pub use cases::{CaseState, CaseStore};
pub use documents::{DocumentState, DocumentStore};
pub use invalidation::{CaseMutation, Collection, DocumentMutation};

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request fence for one collection.
///
/// Each fetch takes a ticket before going out; a response may only be
/// applied if no response with a higher ticket has landed first. A slow
/// response overtaken by a newer one is discarded instead of clobbering
/// fresher state.
#[derive(Debug, Default)]
pub(crate) struct Fence {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl Fence {
    /// Take the next ticket for an outgoing request.
    pub(crate) fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a response holding `ticket` may be applied. Must be called
    /// while holding the state lock so the check and the write are atomic.
    pub(crate) fn try_apply(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) < ticket
    }

    /// Mark every in-flight request stale, e.g. when the store is reset and
    /// late responses must not resurrect cleared state.
    pub(crate) fn invalidate_pending(&self) {
        let issued = self.issued.load(Ordering::SeqCst);
        self.applied.fetch_max(issued, Ordering::SeqCst);
    }
}
