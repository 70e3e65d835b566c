//! Drag gesture capability and release classification.
//!
//! The deck implements [`DragGesture`]; the host registers it once per
//! active-card render cycle and feeds it the samples of a single pointer
//! interaction. Samples carry the accumulated `(dx, dy)` displacement from
//! the gesture's start position, and the release sample is always the last
//! sample of its gesture.

use crate::geometry::Offset;

/// Fraction of the viewport width a drag must cross to commit a swipe.
pub const SWIPE_THRESHOLD_FRACTION: f32 = 0.25;

/// Capability claimed by a component that consumes one drag interaction at a
/// time. The claim in `on_start` is unconditional; there is no slop phase.
pub trait DragGesture {
    /// A pointer went down on the active card.
    fn on_start(&mut self);

    /// The pointer moved; `delta` is the total displacement since `on_start`.
    fn on_move(&mut self, delta: Offset);

    /// The pointer was released; `delta` is the final displacement.
    fn on_end(&mut self, delta: Offset);
}

/// Classification of a released gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The drag crossed the threshold to the right; dismiss the card.
    CommitRight,
    /// The drag crossed the threshold to the left; dismiss the card.
    CommitLeft,
    /// Inconclusive drag; the card returns to rest.
    Cancel,
}

impl GestureOutcome {
    pub fn is_commit(&self) -> bool {
        !matches!(self, GestureOutcome::Cancel)
    }
}

/// Classify a release by its final horizontal displacement.
///
/// Pure function of `(dx, threshold)`; vertical displacement never affects
/// the outcome. Exactly `±threshold` is inconclusive.
pub fn classify_release(dx: f32, threshold: f32) -> GestureOutcome {
    if dx > threshold {
        GestureOutcome::CommitRight
    } else if dx < -threshold {
        GestureOutcome::CommitLeft
    } else {
        GestureOutcome::Cancel
    }
}
