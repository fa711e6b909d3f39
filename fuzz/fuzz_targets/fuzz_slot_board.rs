#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinboard_core::event::PlacementRequest;
use pinboard_core::{PlaceOutcome, Product, SlotBoard};

#[derive(Debug, Arbitrary)]
enum Op {
    Place { code: u8, target: u8 },
    Reorder { origin: u8, target: u8 },
    Remove(u8),
    Swap(u8, u8),
    Reset(u8),
}

fuzz_target!(|input: (u8, Vec<Op>)| {
    let (len, ops) = input;
    let mut board = SlotBoard::new(usize::from(len % 64));

    for op in ops {
        let before = board.clone();
        match op {
            Op::Place { code, target } => {
                let request = PlacementRequest::from_catalog(Product::new(format!("P{}", code % 16), "01"));
                if let Ok(PlaceOutcome::Conflict { .. }) = board.place(&request, usize::from(target)) {
                    assert_eq!(board, before, "conflict mutated the board");
                }
            }
            Op::Reorder { origin, target } => {
                let origin = usize::from(origin);
                if let Some(product) = board.get(origin).cloned() {
                    let _ = board.place(&PlacementRequest::from_slot(product, origin), usize::from(target));
                }
            }
            Op::Remove(slot) => {
                let _ = board.remove(usize::from(slot));
            }
            Op::Swap(a, b) => {
                let _ = board.swap(usize::from(a), usize::from(b));
            }
            Op::Reset(len) => board.reset(usize::from(len % 64)),
        }
        assert!(board.is_consistent(), "duplicate identity on the board");
    }
});
