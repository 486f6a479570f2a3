//! # spark-widgets
//!
//! Headless widget-state coordination for reactive UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! This crate owns no rendering surface. Each coordinator is a small reactive
//! state machine driven by a visual host: the host forwards raw input events
//! and prop updates as plain values (numbers, strings, booleans, element
//! descriptions) and reads back signals or callback results. All state lives
//! on the UI thread; suspension is cooperative (the host's next-tick callback
//! drives frame-coalesced work).
//!
//! Inputs originate from live user interaction, so every coordinator follows
//! one error policy: malformed input is dropped silently and the last valid
//! state is kept. Nothing here returns `Result` or panics on bad input.
//!
//! ## Modules
//!
//! - [`state::range`] - Two-handle range slider state ([`DualRangeCoordinator`])
//! - [`state::drag`] - Track drag to stepped value ([`DragAxisCoordinator`])
//! - [`state::submenu`] - Single-open-submenu enforcement ([`SubmenuCoordinator`])
//! - [`state::focus_group`] - Cross-instance focus reset ([`FocusGroupLink`])
//! - [`a11y`] - ARIA attribute normalization for icon subtrees

pub mod a11y;
pub mod state;

pub use a11y::{
    apply, detect_interactivity, normalize, plan, AttrEdit, Element, IconAria, IconRole,
    InteractivitySignals,
};

pub use state::{
    broadcast, listener_count, reset_focus_group_state, DragAxisCoordinator, DragAxisParams,
    DualRangeCoordinator, FocusBroadcast, FocusChangeHandler, FocusGroupLink, PointerSource,
    SubmenuCoordinator, RELEASE_GRACE,
};
