//! State Module - Widget coordination state machines
//!
//! Each submodule coordinates one interaction concern for a visual host:
//!
//! - **Range** - Two-handle range slider bounds/selection reconciliation
//! - **Drag** - Pointer drags along a track, frame-coalesced, stepped
//! - **Submenu** - At-most-one-open-child enforcement under a parent menu
//! - **Focus group** - Cross-instance focus reset within a widget group
//!
//! The modules are independent leaves: none depends on another, and each is
//! driven by exactly one owning component.

pub mod drag;
pub mod focus_group;
pub mod range;
pub mod submenu;

pub use drag::{DragAxisCoordinator, DragAxisParams, PointerSource, RELEASE_GRACE};
pub use focus_group::{
    broadcast, listener_count, reset_focus_group_state, FocusBroadcast, FocusChangeHandler,
    FocusGroupLink,
};
pub use range::DualRangeCoordinator;
pub use submenu::SubmenuCoordinator;
