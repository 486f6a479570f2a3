//! Drag Axis Coordinator - Pointer drags along a slider track
//!
//! Converts pointer movement along a track into stepped value changes:
//! - Press starts a drag session for one pointer family (mouse or touch);
//!   events from the other family are ignored until release.
//! - Moves coalesce into at most one pending recomputation; the host runs it
//!   from its next-tick / animation-frame callback via [`run_frame`].
//! - Recomputation converts the pixel delta since press into whole steps,
//!   clamps into the selectable sub-range and reports the result through the
//!   value callback. Applied deltas accumulate so partial moves never
//!   double-apply.
//! - Release keeps [`in_progress`] true for a short grace window so the
//!   synthetic click that follows pointer-up on the same element is not taken
//!   for a fresh interaction.
//!
//! [`run_frame`]: DragAxisCoordinator::run_frame
//! [`in_progress`]: DragAxisCoordinator::in_progress
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::state::drag::{DragAxisCoordinator, DragAxisParams, PointerSource};
//! use spark_signals::signal;
//!
//! let value = signal(50.0);
//! let value_out = value.clone();
//!
//! let mut drag = DragAxisCoordinator::new(
//!     DragAxisParams {
//!         value: value.clone(),
//!         range_start: 0.0,
//!         range_end: 100.0,
//!         step: 1.0,
//!         min_selectable: 0.0,
//!         max_selectable: 100.0,
//!     },
//!     || 200.0, // track width in pixels
//!     move |new_value| value_out.set(new_value),
//! );
//!
//! drag.pointer_down(PointerSource::Mouse, 100.0);
//! drag.pointer_move(PointerSource::Mouse, 150.0);
//! drag.run_frame(); // host's next-tick callback
//! assert_eq!(value.get(), 75.0);
//! drag.pointer_up(PointerSource::Mouse);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use spark_signals::{signal, Signal};

/// Grace window after release during which the drag still counts as
/// in progress, so the click fired by the platform right after pointer-up
/// is not misread as a separate interaction.
pub const RELEASE_GRACE: Duration = Duration::from_millis(100);

/// Which input family started the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Axis configuration for one drag coordinator.
///
/// `value` is the host-owned current value; the coordinator reads it when
/// recomputing and proposes updates through the value callback, which the
/// host commits back into the signal.
pub struct DragAxisParams {
    pub value: Signal<f64>,
    /// Value at the left edge of the track.
    pub range_start: f64,
    /// Value at the right edge of the track.
    pub range_end: f64,
    pub step: f64,
    /// Lower bound of the selectable sub-range.
    pub min_selectable: f64,
    /// Upper bound of the selectable sub-range.
    pub max_selectable: f64,
}

/// One press-to-release interaction.
struct DragSession {
    source: PointerSource,
    start_x: f64,
    last_x: f64,
    /// Sum of deltas already reported through the callback.
    applied_change: f64,
    frame_pending: bool,
}

/// Tracks one thumb's drag interaction along a horizontal track.
pub struct DragAxisCoordinator {
    params: DragAxisParams,
    track_width: Rc<dyn Fn() -> f64>,
    on_value: Rc<dyn Fn(f64)>,
    session: Option<DragSession>,
    dragging: Signal<bool>,
    released_at: Cell<Option<Instant>>,
}

impl DragAxisCoordinator {
    /// Create a coordinator.
    ///
    /// `track_width` measures the track element's pixel width; it is called
    /// at recomputation time, never cached, so layout changes mid-drag are
    /// picked up. `on_value` receives each clamped stepped value that differs
    /// from the current one.
    pub fn new(
        params: DragAxisParams,
        track_width: impl Fn() -> f64 + 'static,
        on_value: impl Fn(f64) + 'static,
    ) -> Self {
        Self {
            params,
            track_width: Rc::new(track_width),
            on_value: Rc::new(on_value),
            session: None,
            dragging: signal(false),
            released_at: Cell::new(None),
        }
    }

    /// Begin a drag at the given pointer X. Ignored while a session is live.
    pub fn pointer_down(&mut self, source: PointerSource, x: f64) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(DragSession {
            source,
            start_x: x,
            last_x: x,
            applied_change: 0.0,
            frame_pending: false,
        });
        self.released_at.set(None);
        self.dragging.set(true);
    }

    /// Record pointer movement.
    ///
    /// Only the family that started the drag is tracked. Bursts of moves
    /// coalesce: the latest X overwrites the pending one, and at most one
    /// recomputation stays scheduled.
    pub fn pointer_move(&mut self, source: PointerSource, x: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.source != source {
            return;
        }
        session.last_x = x;
        session.frame_pending = true;
    }

    /// Whether a recomputation is waiting for the host's next tick.
    pub fn frame_pending(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.frame_pending)
    }

    /// Run the pending recomputation, if any. The host calls this from its
    /// next-tick / animation-frame callback.
    pub fn run_frame(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.frame_pending {
            return;
        }
        session.frame_pending = false;

        let width = (self.track_width)();
        let span = self.params.range_end - self.params.range_start;
        let step = self.params.step;
        if !width.is_finite() || width <= 0.0 || !span.is_finite() || span <= 0.0 || step <= 0.0 {
            return;
        }

        // Pixel delta since press, as whole steps.
        let percent_moved = (session.last_x - session.start_x) / width * 100.0;
        let percent_per_step = step / span * 100.0;
        let steps = (percent_moved / percent_per_step).round();

        let current = self.params.value.get();
        let current_on_step = (current / step).round() * step;
        let theoretical = current_on_step + (steps * step - session.applied_change);
        let next = theoretical.clamp(self.params.min_selectable, self.params.max_selectable);

        if next != current {
            session.applied_change += next - current;
            (self.on_value)(next);
        }
    }

    /// End the drag. Cancels any pending recomputation and starts the
    /// post-release grace window.
    pub fn pointer_up(&mut self, source: PointerSource) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.source != source {
            return;
        }
        self.session = None;
        self.released_at.set(Some(Instant::now()));
    }

    /// Abandon the drag without emitting and without a grace window.
    pub fn cancel(&mut self) {
        self.session = None;
        self.released_at.set(None);
        self.dragging.set(false);
    }

    /// Whether an interaction is in progress.
    ///
    /// Stays true from press until [`RELEASE_GRACE`] after release. The
    /// grace window is evaluated lazily against the release timestamp, so
    /// the host polls this (typically from its click handler) rather than
    /// waiting on a timer.
    pub fn in_progress(&self) -> bool {
        if self.session.is_some() {
            return true;
        }
        if let Some(released_at) = self.released_at.get() {
            if released_at.elapsed() < RELEASE_GRACE {
                return true;
            }
            self.released_at.set(None);
            self.dragging.set(false);
        }
        false
    }

    /// Reactive view of [`in_progress`](Self::in_progress). Updated on
    /// press/cancel immediately and on the first poll after the grace
    /// window expires.
    pub fn dragging_signal(&self) -> Signal<bool> {
        self.dragging.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
