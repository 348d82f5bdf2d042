//! Subscriber registry with a per-listener error boundary.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use super::StoreState;

pub(crate) type Listener = Rc<dyn Fn(&StoreState)>;

type Entries = RefCell<Vec<(u64, Listener)>>;

#[derive(Default)]
pub(crate) struct ListenerSet {
    entries: Rc<Entries>,
    next_id: Cell<u64>,
}

impl ListenerSet {
    pub(crate) fn add(&self, listener: Listener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));

        Subscription {
            id,
            entries: Rc::downgrade(&self.entries),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Invoke every listener with `state`.
    ///
    /// Iterates over a snapshot so listeners may unsubscribe themselves (or
    /// each other) mid-pass. A listener removed earlier in the same pass is
    /// skipped. Panics are contained per listener.
    pub(crate) fn notify(&self, state: &StoreState) {
        let snapshot = self.entries.borrow().clone();
        for (id, listener) in snapshot {
            if !self.contains(id) {
                continue;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| (*listener)(state))).is_err() {
                tracing::warn!("Store listener #{} panicked; remaining listeners still run", id);
            }
        }
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Handle returned by [`crate::NoteStore::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    id: u64,
    entries: Weak<Entries>,
}

impl Subscription {
    /// Remove the listener. Returns `true` only for the call that removed it.
    pub fn unsubscribe(&self) -> bool {
        let Some(entries) = self.entries.upgrade() else {
            return false;
        };
        let mut entries = entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(id, _)| *id != self.id);
        entries.len() != before
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
