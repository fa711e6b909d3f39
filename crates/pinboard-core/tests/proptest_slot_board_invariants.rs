//! Property-based invariant tests for the slot board and the normalizer.
//!
//! 1. Uniqueness holds after every place/remove in any sequence
//! 2. A conflict leaves the board unchanged
//! 3. Placing a product into the slot it already holds never conflicts
//! 4. Swapping two slots twice restores the board
//! 5. Quick stationary touches never produce a placement
//! 6. A touch stream yields at most one placement

use pinboard_core::event::{DragSource, GestureEvent, PlacementRequest};
use pinboard_core::geometry::Position;
use pinboard_core::gesture::InteractionNormalizer;
use pinboard_core::store::{PlaceOutcome, SlotBoard};
use pinboard_core::testing::{FakeClock, product, row_of_slots, slot_center};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

const SLOTS: usize = 8;
const SLOT_PX: u32 = 50;

#[derive(Debug, Clone)]
enum Op {
    Place { code: u8, target: usize },
    Reorder { origin: usize, target: usize },
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..6, 0..SLOTS).prop_map(|(code, target)| Op::Place { code, target }),
        2 => (0..SLOTS, 0..SLOTS).prop_map(|(origin, target)| Op::Reorder { origin, target }),
        1 => (0..SLOTS).prop_map(Op::Remove),
    ]
}

fn code(c: u8) -> String {
    format!("P{c}")
}

fn apply(board: &mut SlotBoard, op: &Op) -> Option<PlaceOutcome> {
    match op {
        Op::Place { code: c, target } => board
            .place(&PlacementRequest::from_catalog(product(&code(*c))), *target)
            .ok(),
        Op::Reorder { origin, target } => {
            let product = board.get(*origin).cloned().unwrap_or_else(|| product("X"));
            board
                .place(&PlacementRequest::from_slot(product, *origin), *target)
                .ok()
        }
        Op::Remove(slot) => {
            board.remove(*slot).ok();
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Uniqueness and non-mutating conflicts
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn uniqueness_holds_after_every_operation(
        ops in proptest::collection::vec(op_strategy(), 1..120),
    ) {
        let mut board = SlotBoard::new(SLOTS);
        for op in &ops {
            let before = board.clone();
            let outcome = apply(&mut board, op);
            prop_assert!(board.is_consistent(), "invariant broken by {:?}", op);
            if let Some(PlaceOutcome::Conflict { existing_slot }) = outcome {
                prop_assert_eq!(&board, &before);
                prop_assert!(existing_slot < SLOTS);
            }
            prop_assert_eq!(board.len(), SLOTS);
        }
    }

    #[test]
    fn occupants_of_never_reports_two_slots(
        ops in proptest::collection::vec(op_strategy(), 1..80),
    ) {
        let mut board = SlotBoard::new(SLOTS);
        for op in &ops {
            apply(&mut board, op);
        }
        for c in 0u8..6 {
            let pinned = product(&code(c));
            prop_assert!(board.occupants_of(pinned.identity()).len() <= 1);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3–4. Self-placement and swap symmetry
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn self_placement_never_conflicts(
        ops in proptest::collection::vec(op_strategy(), 0..60),
        pick in 0..SLOTS,
    ) {
        let mut board = SlotBoard::new(SLOTS);
        for op in &ops {
            apply(&mut board, op);
        }
        if let Some(occupant) = board.get(pick).cloned() {
            let before = board.clone();
            let outcome = board.place(&PlacementRequest::from_catalog(occupant), pick);
            prop_assert_eq!(outcome, Ok(PlaceOutcome::Placed));
            prop_assert_eq!(board, before);
        }
    }

    #[test]
    fn swap_twice_is_identity(
        ops in proptest::collection::vec(op_strategy(), 0..60),
        a in 0..SLOTS,
        b in 0..SLOTS,
    ) {
        let mut board = SlotBoard::new(SLOTS);
        for op in &ops {
            apply(&mut board, op);
        }
        let before = board.clone();
        board.swap(a, b).unwrap();
        prop_assert!(board.is_consistent());
        board.swap(a, b).unwrap();
        prop_assert_eq!(board, before);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5–6. Touch disambiguation
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn quick_stationary_touch_never_places(
        slot in 0..SLOTS,
        duration_ms in 0u64..200,
        touch_id in any::<u32>(),
    ) {
        let mut normalizer = InteractionNormalizer::default();
        let board = SlotBoard::new(SLOTS);
        let hit = row_of_slots(SLOTS, SLOT_PX);
        let mut clock = FakeClock::new();
        let pos = slot_center(slot, SLOT_PX);

        normalizer.process(
            &GestureEvent::TouchStart {
                touch_id,
                source: DragSource::Catalog(product("P")),
                pos,
            },
            clock.now(),
            &board,
            &hit,
        );
        let end = normalizer.process(
            &GestureEvent::TouchEnd { touch_id, pos },
            clock.advance_ms(duration_ms),
            &board,
            &hit,
        );
        prop_assert!(end.placement.is_none());
        prop_assert!(normalizer.armed().is_none());
    }

    #[test]
    fn touch_stream_places_at_most_once(
        moves in proptest::collection::vec((0i32..500, 0i32..120), 0..12),
        end in (0i32..500, 0i32..120),
        step_ms in 1u64..80,
    ) {
        let mut normalizer = InteractionNormalizer::default();
        let board = SlotBoard::new(SLOTS);
        let hit = row_of_slots(SLOTS, SLOT_PX);
        let mut clock = FakeClock::new();
        let mut placements = 0;

        let mut events = vec![GestureEvent::TouchStart {
            touch_id: 1,
            source: DragSource::Catalog(product("P")),
            pos: Position::new(0, 0),
        }];
        events.extend(moves.iter().map(|&(x, y)| GestureEvent::TouchMove {
            touch_id: 1,
            pos: Position::new(x, y),
        }));
        events.push(GestureEvent::TouchEnd { touch_id: 1, pos: Position::new(end.0, end.1) });
        // Trailing events from the same stream after it closed.
        events.push(GestureEvent::TouchEnd { touch_id: 1, pos: Position::new(end.0, end.1) });

        for event in &events {
            let d = normalizer.process(event, clock.advance_ms(step_ms), &board, &hit);
            if d.placement.is_some() {
                placements += 1;
            }
        }
        prop_assert!(placements <= 1);
        prop_assert!(normalizer.hover().is_none());
        prop_assert!(normalizer.active_touch().is_none());
    }
}
