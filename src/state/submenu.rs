//! Submenu Coordinator - At-most-one-open-child enforcement
//!
//! A parent menu widget owns an "open" signal; child submenus register with
//! their own open-status signal and a close callback. The coordinator:
//! - closes every other open child whenever one child opens
//! - closes all open children when the parent closes
//! - exposes `have_open_submenu` for the parent's rendering logic
//!
//! Children are expected to live for the coordinator's lifetime (mount parity
//! with the owning widget tree); there is no per-child unregistration.
//! Dropping the coordinator stops all of its watchers.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::state::submenu::SubmenuCoordinator;
//! use spark_signals::signal;
//!
//! let parent_open = signal(true);
//! let coordinator = SubmenuCoordinator::new(parent_open.clone());
//!
//! let file_open = signal(false);
//! let file_status = file_open.clone();
//! coordinator.register(file_status, move || file_open.set(false));
//!
//! // Opening a second child closes the first through its callback;
//! // closing the parent closes whichever child is open.
//! parent_open.set(false);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

struct ChildEntry {
    id: u64,
    status: Signal<bool>,
    on_close: Rc<dyn Fn()>,
}

struct Registry {
    children: Vec<ChildEntry>,
    next_id: u64,
}

/// Coordinates the open state of one menu's registered submenus.
pub struct SubmenuCoordinator {
    registry: Rc<RefCell<Registry>>,
    parent_open: Signal<bool>,
    have_open: Signal<bool>,
    stops: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl SubmenuCoordinator {
    /// Create a coordinator watching the parent's open signal.
    ///
    /// When the parent transitions to closed, every currently-open child is
    /// closed through its callback.
    pub fn new(parent_open: Signal<bool>) -> Self {
        let registry = Rc::new(RefCell::new(Registry {
            children: Vec::new(),
            next_id: 1,
        }));
        let have_open = signal(false);

        let stop = effect({
            let parent_open = parent_open.clone();
            let registry = registry.clone();
            let have_open = have_open.clone();
            move || {
                if !parent_open.get() {
                    close_open_children(&registry, None);
                    refresh_have_open(&registry, &have_open);
                }
            }
        });

        Self {
            registry,
            parent_open,
            have_open,
            stops: RefCell::new(vec![Box::new(stop)]),
        }
    }

    /// Register a child submenu. Returns its assigned id.
    ///
    /// The child's status signal is watched from here on: whenever it becomes
    /// open, every other open child is closed via its callback. The callback
    /// is responsible for setting its own status signal back to closed.
    pub fn register(&self, status: Signal<bool>, on_close: impl Fn() + 'static) -> u64 {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.children.push(ChildEntry {
                id,
                status: status.clone(),
                on_close: Rc::new(on_close),
            });
            id
        };

        let stop = effect({
            let registry = self.registry.clone();
            let have_open = self.have_open.clone();
            move || {
                if status.get() {
                    close_open_children(&registry, Some(id));
                }
                refresh_have_open(&registry, &have_open);
            }
        });
        self.stops.borrow_mut().push(Box::new(stop));

        id
    }

    /// Close every open child.
    pub fn close_all(&self) {
        close_open_children(&self.registry, None);
        refresh_have_open(&self.registry, &self.have_open);
    }

    /// True iff any registered child is currently open.
    pub fn have_open_submenu(&self) -> bool {
        self.have_open.get()
    }

    /// Reactive view of [`have_open_submenu`](Self::have_open_submenu).
    pub fn have_open_submenu_signal(&self) -> Signal<bool> {
        self.have_open.clone()
    }

    pub fn parent_open(&self) -> bool {
        self.parent_open.get()
    }

    pub fn child_count(&self) -> usize {
        self.registry.borrow().children.len()
    }
}

impl Drop for SubmenuCoordinator {
    fn drop(&mut self) {
        for stop in self.stops.borrow_mut().drain(..) {
            stop();
        }
    }
}

/// Invoke the close callback of every open child except `keep`.
///
/// Callbacks are collected before invocation: a callback typically sets its
/// own status signal, which re-enters the watchers, so no registry borrow may
/// be held while calling out.
fn close_open_children(registry: &Rc<RefCell<Registry>>, keep: Option<u64>) {
    let to_close: Vec<Rc<dyn Fn()>> = registry
        .borrow()
        .children
        .iter()
        .filter(|child| Some(child.id) != keep && child.status.get())
        .map(|child| child.on_close.clone())
        .collect();
    for close in to_close {
        close();
    }
}

fn refresh_have_open(registry: &Rc<RefCell<Registry>>, have_open: &Signal<bool>) {
    let any_open = registry
        .borrow()
        .children
        .iter()
        .any(|child| child.status.get());
    if have_open.get() != any_open {
        have_open.set(any_open);
    }
}

// =============================================================================
// TESTS
// =============================================================================
