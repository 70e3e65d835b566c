use swipedeck_core::*;

use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_testing::{assert_at_rest, assert_offset_near, scene_views, DeckRobot, FRAME_NANOS};

#[derive(Clone, Debug, PartialEq)]
struct Card {
    id: u32,
}

impl CardItem for Card {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn cards(ids: &[u32]) -> Rc<[Card]> {
    ids.iter().map(|&id| Card { id }).collect()
}

/// Record of swipe callbacks: positive for right, negative for left.
type SwipeLog = Rc<RefCell<Vec<i64>>>;

const VIEWPORT: f32 = 400.0; // threshold = 100
const EXHAUSTED_VIEW: u32 = 999;

fn deck_with_log(data: Rc<[Card]>) -> (SwipeDeck<Card, u32>, SwipeLog) {
    let log: SwipeLog = Rc::new(RefCell::new(Vec::new()));
    let right_log = Rc::clone(&log);
    let left_log = Rc::clone(&log);
    let config = DeckConfig::new(data, VIEWPORT, |card: &Card| card.id)
        .render_no_more_cards(|| EXHAUSTED_VIEW)
        .on_swipe_right(move |card: &Card| right_log.borrow_mut().push(card.id as i64))
        .on_swipe_left(move |card: &Card| left_log.borrow_mut().push(-(card.id as i64)));
    (SwipeDeck::new(config), log)
}

#[test]
fn swipe_right_past_threshold_commits_and_advances() {
    let (deck, log) = deck_with_log(cards(&[1, 2, 3]));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(150.0, 0.0);

    assert_eq!(*log.borrow(), vec![1]);
    assert_eq!(robot.deck().cursor(), 1);
    assert_eq!(robot.deck().active_card_id(), Some(2));
    assert_at_rest(robot.deck());
}

#[test]
fn swipe_left_past_threshold_commits_left() {
    let (deck, log) = deck_with_log(cards(&[1, 2, 3]));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(-180.0, 20.0);

    assert_eq!(*log.borrow(), vec![-1]);
    assert_eq!(robot.deck().cursor(), 1);
}

#[test]
fn release_within_threshold_springs_back_without_advancing() {
    let (deck, log) = deck_with_log(cards(&[1, 2, 3]));
    let mut robot = DeckRobot::new(deck);

    robot.press();
    robot.drag_to(-40.0, 5.0, 4);
    robot.release_at(-40.0, 5.0);
    assert!(robot.deck().is_animating());

    robot.settle();

    assert!(log.borrow().is_empty());
    assert_eq!(robot.deck().cursor(), 0);
    assert_at_rest(robot.deck());
}

#[test]
fn commit_tween_passes_through_intermediate_offsets() {
    let (deck, _log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    robot.press();
    robot.drag_to(150.0, 0.0, 3);
    robot.release_at(150.0, 0.0);

    // First tick anchors the clock; a few frames in, the card should be
    // between the release point and the exit target.
    robot.advance_frame();
    robot.advance_frame();
    robot.advance_frame();
    let mid = robot.deck().offset();
    assert!(
        mid.x > 150.0 && mid.x < VIEWPORT,
        "expected mid-exit offset, got {:?}",
        mid
    );

    robot.settle();
    assert_at_rest(robot.deck());
}

#[test]
fn swiping_every_card_exhausts_the_deck_in_order() {
    let (deck, log) = deck_with_log(cards(&[1, 2, 3]));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(150.0, 0.0);
    robot.swipe(150.0, 0.0);
    robot.swipe(150.0, 0.0);

    assert_eq!(*log.borrow(), vec![1, 2, 3]);
    assert_eq!(robot.deck().cursor(), 3);
    assert!(robot.deck().is_exhausted());

    match robot.deck().render() {
        DeckScene::Exhausted(view) => assert_eq!(view, Some(EXHAUSTED_VIEW)),
        DeckScene::Stack(_) => panic!("expected exhausted scene"),
    }
}

#[test]
fn exhausted_deck_ignores_further_gestures() {
    let (deck, log) = deck_with_log(cards(&[1]));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(150.0, 0.0);
    assert!(robot.deck().is_exhausted());

    robot.press();
    robot.drag_to(300.0, 0.0, 3);
    robot.release_at(300.0, 0.0);

    assert!(robot.deck().is_idle());
    assert_eq!(robot.deck().offset(), Offset::ZERO);
    assert_eq!(*log.borrow(), vec![1], "no further classification may fire");
}

#[test]
fn empty_data_is_exhausted_at_construction() {
    let (deck, _log) = deck_with_log(cards(&[]));
    assert!(deck.is_exhausted());
    assert!(deck.render().is_exhausted());
    assert_eq!(deck.active_item(), None);
}

#[test]
fn exhausted_view_defaults_to_nothing() {
    let config = DeckConfig::new(cards(&[]), VIEWPORT, |card: &Card| card.id);
    let deck = SwipeDeck::new(config);
    match deck.render() {
        DeckScene::Exhausted(view) => assert_eq!(view, None),
        DeckScene::Stack(_) => panic!("expected exhausted scene"),
    }
}

#[test]
fn new_data_identity_resets_the_cursor() {
    let (deck, _log) = deck_with_log(cards(&[1, 2, 3]));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(150.0, 0.0);
    assert_eq!(robot.deck().cursor(), 1);

    robot.deck_mut().set_data(cards(&[7, 8]));
    assert_eq!(robot.deck().cursor(), 0);
    assert_eq!(robot.deck().active_card_id(), Some(7));
    assert_at_rest(robot.deck());
}

#[test]
fn same_data_identity_does_not_reset() {
    let data = cards(&[1, 2, 3]);
    let (deck, _log) = deck_with_log(Rc::clone(&data));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(150.0, 0.0);
    assert_eq!(robot.deck().cursor(), 1);

    robot.deck_mut().set_data(data);
    assert_eq!(robot.deck().cursor(), 1, "same sequence identity must not reset");
}

#[test]
fn gesture_start_mid_exit_tween_cancels_without_committing() {
    let (deck, log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    robot.press();
    robot.drag_to(150.0, 0.0, 3);
    robot.release_at(150.0, 0.0);
    robot.advance_frame();
    robot.advance_frame();
    let mid = robot.deck().offset();
    assert!(robot.deck().is_animating());

    // Fast re-touch: the exit tween is abandoned, no callback fires, and the
    // drag resumes from wherever the card was.
    robot.press();
    assert!(robot.deck().is_dragging());
    assert!(log.borrow().is_empty());
    assert_eq!(robot.deck().offset(), mid);
    assert_eq!(robot.deck().cursor(), 0);

    // An inconclusive release from here snaps back to the origin.
    robot.release_at(40.0, 0.0);
    robot.settle();
    assert!(log.borrow().is_empty());
    assert_eq!(robot.deck().cursor(), 0);
    assert_at_rest(robot.deck());
}

#[test]
fn commit_records_a_layout_hint_exactly_once() {
    let (deck, _log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    assert!(robot.deck_mut().take_layout_hint().is_none());
    robot.swipe(150.0, 0.0);

    assert!(robot.deck_mut().take_layout_hint().is_some());
    assert!(robot.deck_mut().take_layout_hint().is_none());
}

#[test]
fn cancel_does_not_record_a_layout_hint() {
    let (deck, _log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    robot.press();
    robot.release_at(-40.0, 0.0);
    robot.settle();

    assert!(robot.deck_mut().take_layout_hint().is_none());
}

#[test]
fn move_samples_without_a_start_are_ignored() {
    let (deck, _log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    robot.deck_mut().on_move(Offset::new(120.0, 0.0));
    assert_eq!(robot.deck().offset(), Offset::ZERO);

    robot.deck_mut().on_end(Offset::new(120.0, 0.0));
    assert!(robot.deck().is_idle());
    assert_eq!(robot.deck().cursor(), 0);
}

#[test]
fn zero_delta_samples_are_valid_no_ops() {
    let (deck, log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    robot.press();
    robot.deck_mut().on_move(Offset::ZERO);
    assert_eq!(robot.deck().offset(), Offset::ZERO);

    robot.release_at(0.0, 0.0);
    robot.settle();
    assert!(log.borrow().is_empty());
    assert_eq!(robot.deck().cursor(), 0);
}

#[test]
fn cancel_spring_moves_the_card_back_through_intermediate_offsets() {
    let (deck, _log) = deck_with_log(cards(&[1, 2]));
    let mut robot = DeckRobot::new(deck);

    robot.press();
    robot.drag_to(-80.0, 0.0, 4);
    robot.release_at(-80.0, 0.0);

    let mut saw_partial_return = false;
    while !robot.deck().is_idle() {
        robot.advance_frame();
        let x = robot.deck().offset().x;
        if x > -80.0 && x < -1.0 {
            saw_partial_return = true;
        }
    }
    assert!(saw_partial_return, "spring should report intermediate offsets");
    assert_offset_near(robot.deck(), Offset::ZERO, 1e-6);
}

#[test]
fn scene_emits_cards_back_to_front_with_active_on_top() {
    let (mut deck, _log) = deck_with_log(cards(&[1, 2, 3]));

    deck.on_start();
    deck.on_move(Offset::new(80.0, -12.0));

    let scene = deck.render();
    // Paint order: deepest queued card first, active card last.
    assert_eq!(scene_views(&scene), vec![3, 2, 1]);

    let cards = scene.cards();
    let active = &cards[2].transform;
    assert_eq!(active.translation, Offset::new(80.0, -12.0));
    assert!(active.rotation_degrees > 0.0);
    assert!(active.z_index > cards[1].transform.z_index);
    assert!(cards[1].transform.z_index > cards[0].transform.z_index);

    // Queued cards fan down by the default stagger, ignoring the drag.
    assert_eq!(cards[1].transform.translation, Offset::new(0.0, QUEUED_CARD_STAGGER));
    assert_eq!(
        cards[0].transform.translation,
        Offset::new(0.0, QUEUED_CARD_STAGGER * 2.0)
    );
}

#[test]
fn dismissed_cards_are_not_rendered() {
    let (deck, _log) = deck_with_log(cards(&[1, 2, 3]));
    let mut robot = DeckRobot::new(deck);

    robot.swipe(150.0, 0.0);

    let scene = robot.deck().render();
    assert_eq!(scene_views(&scene), vec![3, 2]);
}

#[test]
fn zero_stagger_reproduces_the_flat_variant() {
    let config = DeckConfig::new(cards(&[1, 2, 3]), VIEWPORT, |card: &Card| card.id).stagger(0.0);
    let deck: SwipeDeck<Card, u32> = SwipeDeck::new(config);

    let scene = deck.render();
    // Queued cards (everything before the active card in paint order) sit
    // exactly at their rest position.
    for card in scene.cards().iter().take(2) {
        assert_ne!(card.view, 1, "active card is last in paint order");
        assert_eq!(card.transform.translation, Offset::ZERO);
    }
}

#[test]
fn harness_clock_advances_one_frame_per_tick() {
    let (deck, _log) = deck_with_log(cards(&[1]));
    let mut robot = DeckRobot::new(deck);

    assert_eq!(robot.now_nanos(), 0);
    robot.advance_frame();
    robot.advance_frame();
    assert_eq!(robot.now_nanos(), 2 * FRAME_NANOS);
}

#[test]
fn swipe_threshold_is_a_quarter_of_the_viewport() {
    let (deck, _log) = deck_with_log(cards(&[1]));
    assert_eq!(deck.swipe_threshold(), VIEWPORT * 0.25);
}
