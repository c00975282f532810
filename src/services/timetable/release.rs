//! Document-level pointer release listeners.
//!
//! A drag must end even when the pointer is released outside the grid that
//! started it. The host forwards every release it sees to a
//! [`PointerReleaseHub`]; grids subscribe for their lifetime and the returned
//! [`ReleaseSubscription`] unsubscribes when dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    active: Vec<(u64, Listener)>,
    // Ids dropped while their listener list was checked out for dispatch
    retired: Vec<u64>,
    dispatching: bool,
}

/// Fan-out point for pointer releases anywhere in the document.
#[derive(Clone, Default)]
pub struct PointerReleaseHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl PointerReleaseHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It stays registered until the guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl FnMut() + 'static) -> ReleaseSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.active.push((id, Box::new(listener)));
        ReleaseSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Notify every live listener of a release.
    pub fn pointer_released(&self) {
        let mut dispatch = {
            let mut listeners = self.listeners.borrow_mut();
            if listeners.dispatching {
                log::warn!("Nested pointer release ignored");
                return;
            }
            listeners.dispatching = true;
            std::mem::take(&mut listeners.active)
        };

        for (_, listener) in dispatch.iter_mut() {
            listener();
        }

        let mut listeners = self.listeners.borrow_mut();
        let retired = std::mem::take(&mut listeners.retired);
        dispatch.retain(|(id, _)| !retired.contains(id));
        // Keep subscriptions added during dispatch after the existing ones
        dispatch.append(&mut listeners.active);
        listeners.active = dispatch;
        listeners.dispatching = false;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().active.len()
    }
}

/// Registration guard returned by [`PointerReleaseHub::subscribe`].
pub struct ReleaseSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl ReleaseSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for ReleaseSubscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let Ok(mut listeners) = listeners.try_borrow_mut() else {
            log::warn!("Release subscription {} dropped while hub was busy", self.id);
            return;
        };
        if listeners.dispatching {
            listeners.retired.push(self.id);
        }
        listeners.active.retain(|(id, _)| *id != self.id);
    }
}

impl std::fmt::Debug for ReleaseSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseSubscription")
            .field("id", &self.id)
            .finish()
    }
}
