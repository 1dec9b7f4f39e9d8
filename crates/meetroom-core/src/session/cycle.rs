//! Process-wide refresh cycle state.
//!
//! `Idle -> Refreshing { waiters } -> Idle`. The first caller to observe an
//! expired credential while `Idle` becomes the leader and performs the
//! refresh; everyone arriving while `Refreshing` is queued and resolved with
//! the leader's outcome, in arrival order.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::warn;

use crate::AccessToken;
use crate::error::RefreshFailure;

/// Outcome delivered to every waiter of a cycle.
pub(crate) type RefreshOutcome = Result<AccessToken, RefreshFailure>;

struct Waiter {
    ticket: u64,
    tx: oneshot::Sender<RefreshOutcome>,
}

#[derive(Default)]
enum CycleState {
    #[default]
    Idle,
    Refreshing {
        waiters: VecDeque<Waiter>,
    },
}

/// How a caller takes part in the refresh cycle.
pub(crate) enum Joined {
    /// The caller must perform the refresh and settle the cycle.
    Leader,
    /// A refresh is already running; await its outcome.
    Waiter {
        ticket: u64,
        rx: oneshot::Receiver<RefreshOutcome>,
    },
}

#[derive(Default)]
pub(crate) struct RefreshCycle {
    state: CycleState,
    next_ticket: u64,
}

impl RefreshCycle {
    /// Test-and-set entry into the cycle.
    pub(crate) fn join(&mut self) -> Joined {
        if let CycleState::Refreshing { waiters } = &mut self.state {
            let (tx, rx) = oneshot::channel();
            let ticket = self.next_ticket;
            self.next_ticket += 1;
            waiters.push_back(Waiter { ticket, tx });
            return Joined::Waiter { ticket, rx };
        }

        self.state = CycleState::Refreshing {
            waiters: VecDeque::new(),
        };
        Joined::Leader
    }

    /// Return to `Idle`, resolving every queued waiter with `outcome`.
    ///
    /// Returns the tickets of the resolved waiters in resolution order.
    pub(crate) fn settle(&mut self, outcome: &RefreshOutcome) -> Vec<u64> {
        let waiters = match std::mem::take(&mut self.state) {
            CycleState::Idle => return Vec::new(),
            CycleState::Refreshing { waiters } => waiters,
        };

        let mut resolved = Vec::with_capacity(waiters.len());
        for waiter in waiters {
            // A waiter whose caller went away just misses the outcome.
            let _ = waiter.tx.send(outcome.clone());
            resolved.push(waiter.ticket);
        }
        resolved
    }

    pub(crate) fn is_refreshing(&self) -> bool {
        matches!(self.state, CycleState::Refreshing { .. })
    }

    pub(crate) fn queued(&self) -> usize {
        match &self.state {
            CycleState::Idle => 0,
            CycleState::Refreshing { waiters } => waiters.len(),
        }
    }
}

pub(crate) fn lock(cycle: &Mutex<RefreshCycle>) -> MutexGuard<'_, RefreshCycle> {
    cycle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held by the leader while the refresh runs.
///
/// Dropping it unsettled (the leader's future was cancelled) fails the
/// cycle so queued waiters are released.
pub(crate) struct LeaderGuard<'a> {
    cycle: &'a Mutex<RefreshCycle>,
    armed: bool,
}

impl<'a> LeaderGuard<'a> {
    pub(crate) fn new(cycle: &'a Mutex<RefreshCycle>) -> Self {
        Self { cycle, armed: true }
    }

    /// Settle the cycle; returns the number of waiters released.
    pub(crate) fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.armed = false;
        lock(self.cycle).settle(outcome).len()
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let failure = RefreshFailure::new("refresh abandoned before completion");
            let released = lock(self.cycle).settle(&Err(failure)).len();
            warn!(released, "Refresh leader dropped; failing queued calls");
        }
    }
}
