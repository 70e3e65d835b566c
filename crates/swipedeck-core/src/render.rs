//! Card transform derivation.
//!
//! Pure functions of the drag offset and each card's position relative to
//! the cursor, recomputed on every offset change (each drag sample and each
//! tween tick). No state lives here.

use smallvec::SmallVec;

use crate::geometry::Offset;

/// Rotation domain as a multiple of the viewport width.
pub const ROTATION_RANGE_WIDTHS: f32 = 1.5;

/// Rotation (degrees) applied when the drag reaches the domain end.
pub const MAX_ROTATION_DEGREES: f32 = 120.0;

/// Visual transform for one card in the stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    /// Translation from the card's rest position.
    pub translation: Offset,
    /// Rotation around the card center, in degrees.
    pub rotation_degrees: f32,
    /// Explicit stacking order; higher paints on top. The active card always
    /// carries the largest value in its scene.
    pub z_index: usize,
}

impl CardTransform {
    pub fn identity() -> Self {
        Self {
            translation: Offset::ZERO,
            rotation_degrees: 0.0,
            z_index: 0,
        }
    }
}

/// One card ready for the render layer, in paint order.
#[derive(Clone, Debug)]
pub struct CardPresentation<V> {
    pub view: V,
    pub transform: CardTransform,
}

/// Everything the render layer needs for one frame of the deck.
pub enum DeckScene<V> {
    /// Cards at and above the cursor, emitted back-to-front so the active
    /// card is last (topmost where paint order decides stacking).
    Stack(SmallVec<[CardPresentation<V>; 8]>),
    /// No cards remain; carries the caller's exhausted view if configured.
    Exhausted(Option<V>),
}

impl<V> DeckScene<V> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, DeckScene::Exhausted(_))
    }

    /// The presentations in paint order, empty when exhausted.
    pub fn cards(&self) -> &[CardPresentation<V>] {
        match self {
            DeckScene::Stack(cards) => cards,
            DeckScene::Exhausted(_) => &[],
        }
    }
}

/// Rotation for the active card, linear in the drag's x displacement.
///
/// Maps `[-1.5w, 0, +1.5w]` to `[-120°, 0°, +120°]` and clamps beyond the
/// domain ends.
pub fn active_card_rotation(offset_x: f32, viewport_width: f32) -> f32 {
    if viewport_width <= 0.0 {
        return 0.0;
    }
    let fraction = offset_x / (viewport_width * ROTATION_RANGE_WIDTHS);
    (fraction * MAX_ROTATION_DEGREES).clamp(-MAX_ROTATION_DEGREES, MAX_ROTATION_DEGREES)
}

/// Transform for the card at `index` given the cursor and live drag offset.
///
/// `stagger` is the vertical fan per queued depth step; pass 0.0 for the
/// legacy flat stack. Callers must not ask about dismissed cards
/// (`index < cursor`).
pub fn card_transform(
    index: usize,
    cursor: usize,
    len: usize,
    offset: Offset,
    viewport_width: f32,
    stagger: f32,
) -> CardTransform {
    debug_assert!(index >= cursor, "dismissed cards are never rendered");
    let z_index = len - index;
    if index == cursor {
        CardTransform {
            translation: offset,
            rotation_degrees: active_card_rotation(offset.x, viewport_width),
            z_index,
        }
    } else {
        CardTransform {
            translation: Offset::new(0.0, stagger * (index - cursor) as f32),
            rotation_degrees: 0.0,
            z_index,
        }
    }
}
