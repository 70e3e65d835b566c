//! Robot-style driver for a deck under test.
//!
//! Gesture samples and frame ticks are delivered exactly the way a host loop
//! would: ordered, single-threaded, with the release as the last sample of
//! its gesture and the clock advanced in ~60 FPS steps.

use log::trace;

use swipedeck_core::{CardItem, DragGesture, Offset, SwipeDeck};

/// One frame at ~60 FPS, in nanoseconds.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound of frames [`DeckRobot::settle`] will pump before giving up.
/// Generous enough for any spring the component configures.
const SETTLE_FRAME_CAP: usize = 600;

/// Drives a [`SwipeDeck`] with scripted gestures and a manual frame clock.
pub struct DeckRobot<T: CardItem, V> {
    deck: SwipeDeck<T, V>,
    now_nanos: u64,
}

impl<T: CardItem, V> DeckRobot<T, V> {
    pub fn new(deck: SwipeDeck<T, V>) -> Self {
        Self { deck, now_nanos: 0 }
    }

    pub fn deck(&self) -> &SwipeDeck<T, V> {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut SwipeDeck<T, V> {
        &mut self.deck
    }

    /// Current scripted clock, in nanoseconds.
    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }

    /// Put the pointer down on the active card.
    pub fn press(&mut self) {
        self.deck.on_start();
    }

    /// Drag toward `(dx, dy)` in `steps` interpolated move samples, ending
    /// exactly at the requested displacement.
    pub fn drag_to(&mut self, dx: f32, dy: f32, steps: usize) {
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.deck
                .on_move(Offset::new(dx * fraction, dy * fraction));
        }
    }

    /// Release the pointer with a final displacement of `(dx, dy)`.
    pub fn release_at(&mut self, dx: f32, dy: f32) {
        self.deck.on_end(Offset::new(dx, dy));
    }

    /// Advance the frame clock by one frame and tick the deck.
    pub fn advance_frame(&mut self) {
        self.now_nanos += FRAME_NANOS;
        self.deck.on_frame(self.now_nanos);
    }

    /// Pump frames until the deck returns to `Idle`. Returns the number of
    /// frames pumped.
    ///
    /// # Panics
    /// Panics if the deck is still animating after a generous frame budget,
    /// which indicates a tween that never completes.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while !self.deck.is_idle() {
            assert!(
                frames < SETTLE_FRAME_CAP,
                "deck did not settle within {} frames",
                SETTLE_FRAME_CAP
            );
            self.advance_frame();
            frames += 1;
        }
        trace!("deck settled after {} frames", frames);
        frames
    }

    /// Full gesture: press, drag in a few samples, release, and settle the
    /// resulting animation.
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        self.press();
        self.drag_to(dx, dy, 5);
        self.release_at(dx, dy);
        self.settle();
    }
}
