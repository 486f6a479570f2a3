//! Dual Range Coordinator - Two-handle range slider state
//!
//! Keeps a `(min, max, step, selection)` quintuple consistent while the host
//! feeds it live prop updates:
//! - `range_min <= selected_min <= selected_max <= range_max` after every update
//! - `0 < step <= range_max - range_min`
//!
//! Inputs originate from user-typed or user-dragged values, so transient
//! garbage (NaN, infinities, inverted pairs) is expected. Invalid updates are
//! dropped silently and the last valid state is kept.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::state::range::DualRangeCoordinator;
//!
//! let range = DualRangeCoordinator::new(0.0, 100.0, 1.0, [25.0, 75.0]);
//!
//! range.set_value([-50.0, 150.0]); // clamped to [0, 100]
//! assert_eq!(range.selected_min(), 0.0);
//! assert_eq!(range.selected_max(), 100.0);
//!
//! range.set_value([60.0, 40.0]); // inverted pair - ignored
//! assert_eq!(range.selected_max(), 100.0);
//! ```

use spark_signals::{signal, Signal};

/// Reactive state for a two-handle range slider.
///
/// All five cells are signals so hosts can build effects over them. Mutation
/// goes through the `set_*` methods, which validate and clamp; the signals
/// themselves are read-only from the host's point of view.
pub struct DualRangeCoordinator {
    range_min: Signal<f64>,
    range_max: Signal<f64>,
    step: Signal<f64>,
    selected_min: Signal<f64>,
    selected_max: Signal<f64>,
}

impl DualRangeCoordinator {
    /// Create a coordinator from the widget's initial props.
    ///
    /// An inverted `min > max` pair is swapped silently. The selection starts
    /// at the full range, then the initial `step` and `value` pair are applied
    /// once with the same validation as later updates.
    pub fn new(min: f64, max: f64, step: f64, value: [f64; 2]) -> Self {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };

        // Seed step keeps the step invariant even before the caller's step is
        // validated (a degenerate range falls back to 1).
        let seed_step = if hi - lo > 0.0 { (hi - lo).min(1.0) } else { 1.0 };

        let coordinator = Self {
            range_min: signal(lo),
            range_max: signal(hi),
            step: signal(seed_step),
            selected_min: signal(lo),
            selected_max: signal(hi),
        };

        coordinator.set_step(step);
        coordinator.set_value(value);
        coordinator
    }

    /// Update the lower bound of the range.
    ///
    /// Ignored when the value is not finite or above the current `range_max`.
    /// Both selected bounds are pulled up to the new minimum when they sit
    /// below it; when both sit below it, the selection collapses to the new
    /// minimum (min handle first, then max).
    pub fn set_min(&self, min: f64) {
        if !min.is_finite() || min > self.range_max.get() {
            return;
        }
        self.range_min.set(min);
        if self.selected_min.get() < min {
            self.selected_min.set(min);
        }
        if self.selected_max.get() < min {
            self.selected_max.set(min);
        }
    }

    /// Update the upper bound of the range.
    ///
    /// Symmetric to [`set_min`](Self::set_min): ignored when not finite or
    /// below the current `range_min`; selected bounds above it are pulled
    /// down, collapsing to the new maximum when both sit above it.
    pub fn set_max(&self, max: f64) {
        if !max.is_finite() || max < self.range_min.get() {
            return;
        }
        self.range_max.set(max);
        if self.selected_max.get() > max {
            self.selected_max.set(max);
        }
        if self.selected_min.get() > max {
            self.selected_min.set(max);
        }
    }

    /// Update the step size, stored as an absolute value.
    ///
    /// Ignored unless finite, non-zero, and no larger than the range width.
    pub fn set_step(&self, step: f64) {
        if !step.is_finite() {
            return;
        }
        let step = step.abs();
        if step <= 0.0 || step > self.range_max.get() - self.range_min.get() {
            return;
        }
        self.step.set(step);
    }

    /// Update the selected pair.
    ///
    /// The whole update is dropped when either entry is not finite or the
    /// pair is inverted; otherwise each bound is clamped into
    /// `[range_min, range_max]` independently.
    pub fn set_value(&self, value: [f64; 2]) {
        let [lo, hi] = value;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return;
        }
        let min = self.range_min.get();
        let max = self.range_max.get();
        self.selected_min.set(lo.clamp(min, max));
        self.selected_max.set(hi.clamp(min, max));
    }

    pub fn range_min(&self) -> f64 {
        self.range_min.get()
    }

    pub fn range_max(&self) -> f64 {
        self.range_max.get()
    }

    pub fn step(&self) -> f64 {
        self.step.get()
    }

    pub fn selected_min(&self) -> f64 {
        self.selected_min.get()
    }

    pub fn selected_max(&self) -> f64 {
        self.selected_max.get()
    }

    /// Signal accessors for hosts that derive from the coordinator's outputs.
    pub fn range_min_signal(&self) -> Signal<f64> {
        self.range_min.clone()
    }

    pub fn range_max_signal(&self) -> Signal<f64> {
        self.range_max.clone()
    }

    pub fn step_signal(&self) -> Signal<f64> {
        self.step.clone()
    }

    pub fn selected_min_signal(&self) -> Signal<f64> {
        self.selected_min.clone()
    }

    pub fn selected_max_signal(&self) -> Signal<f64> {
        self.selected_max.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
