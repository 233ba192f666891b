//! Live query subscription plumbing.
//!
//! # Responsibility
//! - Track registered watchers and route fresh snapshots to them.
//! - Tie delivery lifetime to an explicit cancellation guard.
//!
//! # Invariants
//! - Emissions within one subscription arrive in registration/mutation order.
//! - A dropped or cancelled subscription receives nothing further.
//! - Watchers whose receiver is gone are pruned on the next publish.

use crate::model::employee::{Employee, EmployeeId};
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

/// Registry key for one active watcher.
pub type WatchId = u64;

/// Channel endpoint for one registered watcher.
pub(crate) enum WatchSender {
    /// Full-roster feed.
    All(Sender<Vec<Employee>>),
    /// Single-row feed keyed by employee id.
    ById(EmployeeId, Sender<Option<Employee>>),
}

/// Shared table of active watchers.
#[derive(Default)]
pub(crate) struct WatchRegistry {
    next_id: WatchId,
    watchers: HashMap<WatchId, WatchSender>,
}

impl WatchRegistry {
    pub(crate) fn register(&mut self, sender: WatchSender) -> WatchId {
        let id = self.next_id;
        self.next_id += 1;
        self.watchers.insert(id, sender);
        id
    }

    pub(crate) fn remove(&mut self, id: WatchId) -> bool {
        self.watchers.remove(&id).is_some()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    /// Delivers a fresh roster snapshot to every live watcher.
    ///
    /// By-id feeds receive the matching row derived from the same snapshot,
    /// so all feeds observe one consistent table state per publish.
    pub(crate) fn publish(&mut self, roster: &[Employee]) {
        let mut disconnected = Vec::new();

        for (&watch_id, sender) in &self.watchers {
            let delivered = match sender {
                WatchSender::All(tx) => tx.send(roster.to_vec()).is_ok(),
                WatchSender::ById(id, tx) => {
                    let row = roster.iter().find(|employee| employee.id == *id).cloned();
                    tx.send(row).is_ok()
                }
            };
            if !delivered {
                disconnected.push(watch_id);
            }
        }

        for watch_id in disconnected {
            self.watchers.remove(&watch_id);
            debug!("event=watch_prune module=store watch_id={watch_id}");
        }
    }
}

/// Unregisters its watcher when dropped.
pub(crate) struct WatchGuard {
    id: WatchId,
    registry: Arc<Mutex<WatchRegistry>>,
}

impl WatchGuard {
    pub(crate) fn new(id: WatchId, registry: Arc<Mutex<WatchRegistry>>) -> Self {
        Self { id, registry }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if self.registry.lock().remove(self.id) {
            debug!("event=watch_cancel module=store watch_id={}", self.id);
        }
    }
}

/// Live feed of query results for one registered watcher.
///
/// The store pushes a fresh result after every successful mutation; the
/// first emission (the current snapshot) is already queued when the
/// subscription is handed out. Delivery stops when this value is dropped
/// or explicitly cancelled.
pub struct Subscription<T> {
    receiver: Receiver<T>,
    guard: WatchGuard,
}

impl<T> Subscription<T> {
    pub(crate) fn new(receiver: Receiver<T>, guard: WatchGuard) -> Self {
        Self { receiver, guard }
    }

    /// Registry id of the underlying watcher.
    pub fn watch_id(&self) -> WatchId {
        self.guard.id
    }

    /// Blocks until the next emission arrives.
    ///
    /// Returns `None` once delivery has ended (the store side is gone).
    pub fn recv(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Returns a pending emission without blocking, `None` when there is none.
    pub fn try_recv(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Cancels this subscription, ending delivery immediately.
    pub fn cancel(self) {
        drop(self);
    }
}
