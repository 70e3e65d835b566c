//! The swipe deck component.
//!
//! [`SwipeDeck`] owns the cursor into the card sequence, the live drag
//! offset, and the gesture state machine. It consumes drag samples through
//! the [`DragGesture`] capability and is advanced through animations by the
//! host loop calling [`SwipeDeck::on_frame`].
//!
//! State machine: `Idle` (offset at rest) → `Dragging` (offset tracks the
//! pointer verbatim) → `Animating` (offset under tween control, pointer
//! samples without a fresh start are ignored) → `Idle`. The drag offset is
//! the only mutable value shared between the gesture path and the animation
//! path; the state machine keeps the two writers mutually exclusive without
//! any locking.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use smallvec::SmallVec;

use swipedeck_animation::{Easing, SpringSpec, Tween, TweenFrame, TweenMode, TweenSpec};

use crate::geometry::Offset;
use crate::gesture::{classify_release, DragGesture, GestureOutcome, SWIPE_THRESHOLD_FRACTION};
use crate::render::{card_transform, CardPresentation, DeckScene};

/// Duration of the commit exit tween, in milliseconds.
pub const SWIPE_OUT_MILLIS: u64 = 250;

/// Default vertical fan, in logical pixels per queued depth step.
pub const QUEUED_CARD_STAGGER: f32 = 10.0;

/// An item that can appear in a deck. Items are opaque to the deck beyond
/// having a stable identity, which hosts use to re-register the gesture
/// handler when the active card changes.
pub trait CardItem {
    type Id: PartialEq + Copy + fmt::Debug;

    fn id(&self) -> Self::Id;
}

type RenderCardFn<T, V> = Box<dyn Fn(&T) -> V>;
type RenderExhaustedFn<V> = Box<dyn Fn() -> V>;
type SwipeCallback<T> = Box<dyn FnMut(&T)>;

/// Construction options for a [`SwipeDeck`].
///
/// All callbacks default to no-ops and the exhausted view defaults to
/// nothing, so a minimal deck only needs data, a viewport width, and a card
/// renderer.
pub struct DeckConfig<T, V> {
    data: Rc<[T]>,
    viewport_width: f32,
    stagger: f32,
    render_card: RenderCardFn<T, V>,
    render_no_more_cards: Option<RenderExhaustedFn<V>>,
    on_swipe_left: SwipeCallback<T>,
    on_swipe_right: SwipeCallback<T>,
}

impl<T, V> DeckConfig<T, V> {
    pub fn new(
        data: Rc<[T]>,
        viewport_width: f32,
        render_card: impl Fn(&T) -> V + 'static,
    ) -> Self {
        Self {
            data,
            viewport_width,
            stagger: QUEUED_CARD_STAGGER,
            render_card: Box::new(render_card),
            render_no_more_cards: None,
            on_swipe_left: Box::new(|_| {}),
            on_swipe_right: Box::new(|_| {}),
        }
    }

    /// View shown once the deck is exhausted.
    pub fn render_no_more_cards(mut self, render: impl Fn() -> V + 'static) -> Self {
        self.render_no_more_cards = Some(Box::new(render));
        self
    }

    /// Invoked once per committed left swipe, after the cursor advance.
    pub fn on_swipe_left(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_left = Box::new(callback);
        self
    }

    /// Invoked once per committed right swipe, after the cursor advance.
    pub fn on_swipe_right(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_right = Box::new(callback);
        self
    }

    /// Vertical fan per queued depth step. Zero reproduces the legacy flat
    /// stack.
    pub fn stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }
}

/// Gesture state of the deck. `Animating` remembers the outcome to apply
/// when the tween finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeckState {
    Idle,
    Dragging,
    Animating(GestureOutcome),
}

/// A stack of swappable cards dismissed by horizontal drags.
pub struct SwipeDeck<T: CardItem, V> {
    config: DeckConfig<T, V>,
    cursor: usize,
    offset: Offset,
    state: DeckState,
    tween: Option<Tween<Offset>>,
    layout_hint: Option<SpringSpec>,
}

impl<T: CardItem, V> SwipeDeck<T, V> {
    pub fn new(config: DeckConfig<T, V>) -> Self {
        Self {
            config,
            cursor: 0,
            offset: Offset::ZERO,
            state: DeckState::Idle,
            tween: None,
            layout_hint: None,
        }
    }

    /// Index of the currently active card. Equals `len` once exhausted.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Live displacement of the active card from its rest position.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Horizontal displacement a release must exceed to commit.
    pub fn swipe_threshold(&self) -> f32 {
        self.config.viewport_width * SWIPE_THRESHOLD_FRACTION
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.config.data.len()
    }

    pub fn is_idle(&self) -> bool {
        self.state == DeckState::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DeckState::Dragging
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, DeckState::Animating(_))
    }

    /// The item under the cursor, if any.
    pub fn active_item(&self) -> Option<&T> {
        self.config.data.get(self.cursor)
    }

    /// Identity of the active card. Hosts re-register the gesture handler
    /// when this changes between render cycles.
    pub fn active_card_id(&self) -> Option<T::Id> {
        self.active_item().map(CardItem::id)
    }

    /// Replace the card sequence.
    ///
    /// A new sequence identity (by `Rc` pointer, mirroring a data-source
    /// swap rather than a mutation) resets the cursor to 0 and abandons any
    /// in-flight gesture or tween. Passing the same sequence is a no-op.
    pub fn set_data(&mut self, data: Rc<[T]>) {
        if Rc::ptr_eq(&self.config.data, &data) {
            return;
        }
        debug!(
            "deck data replaced ({} -> {} items), cursor reset",
            self.config.data.len(),
            data.len()
        );
        self.config.data = data;
        self.cursor = 0;
        self.offset = Offset::ZERO;
        self.state = DeckState::Idle;
        self.tween = None;
    }

    /// Take the one-shot spring hint recorded when the stack shifted, so the
    /// host can animate queued cards sliding into place.
    pub fn take_layout_hint(&mut self) -> Option<SpringSpec> {
        self.layout_hint.take()
    }

    /// Advance any in-flight tween to `now_nanos`. No-op outside
    /// `Animating`. Commit completion fires the matching swipe callback with
    /// the dismissed item, advances the cursor, and snaps the offset back to
    /// the origin without animating.
    pub fn on_frame(&mut self, now_nanos: u64) {
        let DeckState::Animating(outcome) = self.state else {
            return;
        };
        let Some(tween) = self.tween.as_mut() else {
            return;
        };

        match tween.tick(now_nanos) {
            TweenFrame::Running(value) => {
                self.offset = value;
                trace!("tween tick: offset=({:.1}, {:.1})", value.x, value.y);
            }
            TweenFrame::Finished(value) => {
                self.offset = value;
                self.tween = None;
                self.state = DeckState::Idle;
                match outcome {
                    GestureOutcome::Cancel => {
                        debug!("cancel settled, card back at rest");
                        self.offset = Offset::ZERO;
                    }
                    GestureOutcome::CommitRight | GestureOutcome::CommitLeft => {
                        self.complete_commit(outcome);
                    }
                }
            }
        }
    }

    fn complete_commit(&mut self, outcome: GestureOutcome) {
        let data = Rc::clone(&self.config.data);
        let Some(item) = data.get(self.cursor) else {
            // Unreachable while the exhaustion guard in on_start holds.
            return;
        };
        debug!(
            "commit {:?} complete: card {:?}, cursor {} -> {}",
            outcome,
            item.id(),
            self.cursor,
            self.cursor + 1
        );

        self.cursor += 1;
        self.offset = Offset::ZERO;
        // Queued cards shift up one slot; let the host spring them there.
        self.layout_hint = Some(SpringSpec::default_spring());

        match outcome {
            GestureOutcome::CommitRight => (self.config.on_swipe_right)(item),
            GestureOutcome::CommitLeft => (self.config.on_swipe_left)(item),
            GestureOutcome::Cancel => unreachable!("cancel never reaches commit completion"),
        }
    }

    /// Derive the scene for the current offset and cursor. Pure with respect
    /// to deck state; call on every offset change.
    pub fn render(&self) -> DeckScene<V> {
        let len = self.config.data.len();
        if self.cursor >= len {
            return DeckScene::Exhausted(
                self.config.render_no_more_cards.as_ref().map(|render| render()),
            );
        }

        // Back-to-front: deepest queued card first, active card last.
        let mut cards = SmallVec::new();
        for index in (self.cursor..len).rev() {
            cards.push(CardPresentation {
                view: (self.config.render_card)(&self.config.data[index]),
                transform: card_transform(
                    index,
                    self.cursor,
                    len,
                    self.offset,
                    self.config.viewport_width,
                    self.config.stagger,
                ),
            });
        }
        DeckScene::Stack(cards)
    }
}

impl<T: CardItem, V> DragGesture for SwipeDeck<T, V> {
    fn on_start(&mut self) {
        if self.is_exhausted() {
            trace!("gesture start ignored: deck exhausted");
            return;
        }
        match self.state {
            DeckState::Idle => {
                self.offset = Offset::ZERO;
                self.state = DeckState::Dragging;
                debug!("drag started on card {:?}", self.active_card_id());
            }
            DeckState::Animating(outcome) => {
                // Re-touch during a tween: cancel it without firing its
                // completion and resume dragging from the current offset.
                self.tween = None;
                self.state = DeckState::Dragging;
                debug!(
                    "drag started mid-{:?} tween, tween cancelled at ({:.1}, {:.1})",
                    outcome, self.offset.x, self.offset.y
                );
            }
            DeckState::Dragging => {
                // A second start without a release; keep tracking.
                trace!("redundant gesture start while dragging");
            }
        }
    }

    fn on_move(&mut self, delta: Offset) {
        if self.state != DeckState::Dragging {
            // Samples with no corresponding start (e.g. delivered after a
            // release raced an animation) are dropped.
            trace!("move sample ignored in {:?}", self.state);
            return;
        }
        // The offset is the sample verbatim; no smoothing, no velocity
        // integration.
        self.offset = delta;
        trace!("drag sample: ({:.1}, {:.1})", delta.x, delta.y);
    }

    fn on_end(&mut self, delta: Offset) {
        if self.state != DeckState::Dragging {
            trace!("release sample ignored in {:?}", self.state);
            return;
        }
        self.offset = delta;

        let threshold = self.swipe_threshold();
        let outcome = classify_release(delta.x, threshold);
        debug!(
            "release at dx={:.1} (threshold {:.1}) -> {:?}",
            delta.x, threshold, outcome
        );

        let tween = match outcome {
            GestureOutcome::CommitRight => Tween::new(
                self.offset,
                Offset::new(self.config.viewport_width, 0.0),
                TweenMode::Timed(TweenSpec::tween(SWIPE_OUT_MILLIS, Easing::EaseInOut)),
            ),
            GestureOutcome::CommitLeft => Tween::new(
                self.offset,
                Offset::new(-self.config.viewport_width, 0.0),
                TweenMode::Timed(TweenSpec::tween(SWIPE_OUT_MILLIS, Easing::EaseInOut)),
            ),
            GestureOutcome::Cancel => Tween::new(
                self.offset,
                Offset::ZERO,
                TweenMode::Settling(SpringSpec::default_spring()),
            ),
        };
        self.tween = Some(tween);
        self.state = DeckState::Animating(outcome);
    }
}
