//! Swipeable card deck: drag the top card past a threshold to dismiss it
//! left or right, or release early to snap it back.
//!
//! The component is single-threaded and pull-driven: a host event loop feeds
//! it gesture samples (through [`DragGesture`]) and frame timestamps
//! (through [`SwipeDeck::on_frame`]), and reads back a [`DeckScene`] after
//! every change.

pub mod deck;
pub mod geometry;
pub mod gesture;
pub mod render;

pub use deck::{CardItem, DeckConfig, SwipeDeck, QUEUED_CARD_STAGGER, SWIPE_OUT_MILLIS};
pub use geometry::Offset;
pub use gesture::{classify_release, DragGesture, GestureOutcome, SWIPE_THRESHOLD_FRACTION};
pub use render::{
    active_card_rotation, card_transform, CardPresentation, CardTransform, DeckScene,
    MAX_ROTATION_DEGREES, ROTATION_RANGE_WIDTHS,
};
