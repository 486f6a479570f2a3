//! Focus Group Broadcasting - Cross-instance focus reset
//!
//! Sibling widget instances sharing a group id (e.g. several accordions in
//! one exclusive group) need to drop their own focused item whenever a peer
//! takes focus. Instead of a platform event bus, a process-wide registry of
//! listeners delivers each broadcast synchronously to every attached link;
//! each receiver filters out its own messages and foreign groups and resets
//! to "no focus" for anything else. Receivers never adopt the emitted item
//! id - the payload travels for inspection only.
//!
//! Listener lifetime is tied 1:1 to the owning widget: attach on activate,
//! detach on deactivate (dropping a link detaches it).
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::state::focus_group::FocusGroupLink;
//!
//! let link = FocusGroupLink::new("accordion-1", "sidebar", |focus| {
//!     assert!(focus.is_none()); // peers always reset
//! });
//! link.attach();
//!
//! // Some other instance in the same group announces a focus change:
//! link.emit(Some("item-3"));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handler invoked on a receiving instance. Always called with `None`.
pub type FocusChangeHandler = Rc<dyn Fn(Option<String>)>;

/// One focus-change announcement. Ephemeral: dispatched and consumed
/// synchronously, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusBroadcast {
    pub source_instance: String,
    pub group: String,
    pub item: Option<String>,
}

struct Listener {
    token: u64,
    instance_id: String,
    group_id: String,
    handler: FocusChangeHandler,
}

thread_local! {
    static LISTENERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
    static NEXT_TOKEN: Cell<u64> = const { Cell::new(1) };
}

/// A widget instance's connection to its focus group.
pub struct FocusGroupLink {
    instance_id: String,
    group_id: String,
    handler: FocusChangeHandler,
    token: Cell<Option<u64>>,
}

impl FocusGroupLink {
    /// Create a link for `(instance_id, group_id)`. The link starts detached;
    /// call [`attach`](Self::attach) when the owning widget becomes active.
    pub fn new(
        instance_id: impl Into<String>,
        group_id: impl Into<String>,
        on_focus_change: impl Fn(Option<String>) + 'static,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            group_id: group_id.into(),
            handler: Rc::new(on_focus_change),
            token: Cell::new(None),
        }
    }

    /// Start receiving broadcasts. Idempotent.
    pub fn attach(&self) {
        if self.token.get().is_some() {
            return;
        }
        let token = NEXT_TOKEN.with(|next| {
            let token = next.get();
            next.set(token + 1);
            token
        });
        LISTENERS.with(|listeners| {
            listeners.borrow_mut().push(Listener {
                token,
                instance_id: self.instance_id.clone(),
                group_id: self.group_id.clone(),
                handler: self.handler.clone(),
            });
        });
        self.token.set(Some(token));
    }

    /// Stop receiving broadcasts. No-op when not attached.
    pub fn detach(&self) {
        let Some(token) = self.token.take() else {
            return;
        };
        LISTENERS.with(|listeners| {
            listeners.borrow_mut().retain(|l| l.token != token);
        });
    }

    pub fn is_attached(&self) -> bool {
        self.token.get().is_some()
    }

    /// Announce a focus change to every attached listener, this instance
    /// included (receivers filter out their own messages).
    pub fn emit(&self, item_id: Option<&str>) {
        broadcast(&FocusBroadcast {
            source_instance: self.instance_id.clone(),
            group: self.group_id.clone(),
            item: item_id.map(str::to_string),
        });
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

impl Drop for FocusGroupLink {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Deliver a broadcast to every attached listener.
///
/// Each receiver ignores self-originated and foreign-group messages and
/// otherwise resets with `None`. Handlers are cloned out of the registry
/// before invocation so a handler may attach or detach links.
pub fn broadcast(message: &FocusBroadcast) {
    let targets: Vec<(String, String, FocusChangeHandler)> = LISTENERS.with(|listeners| {
        listeners
            .borrow()
            .iter()
            .map(|l| (l.instance_id.clone(), l.group_id.clone(), l.handler.clone()))
            .collect()
    });

    for (instance_id, group_id, handler) in targets {
        if instance_id == message.source_instance || group_id != message.group {
            continue;
        }
        handler(None);
    }
}

/// Number of currently attached listeners (all groups).
pub fn listener_count() -> usize {
    LISTENERS.with(|listeners| listeners.borrow().len())
}

/// Reset the process-wide registry (for testing).
pub fn reset_focus_group_state() {
    LISTENERS.with(|listeners| listeners.borrow_mut().clear());
    NEXT_TOKEN.with(|next| next.set(1));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_focus_group_state();
    }

    fn counting_link(instance: &str, group: &str) -> (FocusGroupLink, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let count_in = count.clone();
        let link = FocusGroupLink::new(instance, group, move |focus| {
            assert!(focus.is_none());
            count_in.set(count_in.get() + 1);
        });
        link.attach();
        (link, count)
    }

    #[test]
    fn test_self_broadcast_ignored() {
        setup();
        let (link, count) = counting_link("a", "g1");

        link.emit(Some("item-1"));
        link.emit(None);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_same_group_peer_resets() {
        setup();
        let (a, a_count) = counting_link("a", "g1");
        let (_b, b_count) = counting_link("b", "g1");

        a.emit(Some("item-1"));
        assert_eq!(a_count.get(), 0);
        assert_eq!(b_count.get(), 1);

        // Item id is irrelevant to receivers
        a.emit(None);
        assert_eq!(b_count.get(), 2);
    }

    #[test]
    fn test_other_group_ignored() {
        setup();
        let (a, _a_count) = counting_link("a", "g1");
        let (_b, b_count) = counting_link("b", "g2");

        a.emit(Some("item-1"));
        assert_eq!(b_count.get(), 0);
    }

    #[test]
    fn test_detach_stops_delivery() {
        setup();
        let (a, _a_count) = counting_link("a", "g1");
        let (b, b_count) = counting_link("b", "g1");

        b.detach();
        a.emit(Some("item-1"));
        assert_eq!(b_count.get(), 0);
        assert!(!b.is_attached());

        // Re-attach resumes delivery
        b.attach();
        a.emit(Some("item-2"));
        assert_eq!(b_count.get(), 1);
    }

    #[test]
    fn test_attach_idempotent() {
        setup();
        let (a, _a_count) = counting_link("a", "g1");
        let (b, b_count) = counting_link("b", "g1");

        b.attach();
        b.attach();
        assert_eq!(listener_count(), 2);

        a.emit(None);
        assert_eq!(b_count.get(), 1);
    }

    #[test]
    fn test_drop_detaches() {
        setup();
        let (a, _a_count) = counting_link("a", "g1");
        let count = {
            let (_b, b_count) = counting_link("b", "g1");
            b_count
        };

        assert_eq!(listener_count(), 1);
        a.emit(Some("item-1"));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_plain_broadcast_function() {
        setup();
        let (_a, a_count) = counting_link("a", "g1");

        broadcast(&FocusBroadcast {
            source_instance: "external".to_string(),
            group: "g1".to_string(),
            item: Some("item-9".to_string()),
        });
        assert_eq!(a_count.get(), 1);
    }
}
