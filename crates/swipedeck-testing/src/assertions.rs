//! Assertion helpers shared by deck test suites.

use swipedeck_core::{CardItem, DeckScene, Offset, SwipeDeck};

/// Assert the deck's offset is within `epsilon` of `expected` on both axes.
pub fn assert_offset_near<T: CardItem, V>(
    deck: &SwipeDeck<T, V>,
    expected: Offset,
    epsilon: f32,
) {
    let offset = deck.offset();
    assert!(
        (offset.x - expected.x).abs() <= epsilon && (offset.y - expected.y).abs() <= epsilon,
        "offset ({}, {}) not within {} of ({}, {})",
        offset.x,
        offset.y,
        epsilon,
        expected.x,
        expected.y
    );
}

/// Assert the deck is idle with its card exactly at rest.
pub fn assert_at_rest<T: CardItem, V>(deck: &SwipeDeck<T, V>) {
    assert!(deck.is_idle(), "deck should be idle");
    assert!(
        deck.offset().is_zero(),
        "offset should be at the origin, got {:?}",
        deck.offset()
    );
}

/// The views of a scene in paint order, for comparing against expectations.
pub fn scene_views<V: Clone>(scene: &DeckScene<V>) -> Vec<V> {
    scene.cards().iter().map(|card| card.view.clone()).collect()
}
