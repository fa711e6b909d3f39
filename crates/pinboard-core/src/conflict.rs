#![forbid(unsafe_code)]

//! Duplicate-placement handling.
//!
//! The uniqueness invariant is enforced by refusal: a catalog placement of a
//! product that is already pinned elsewhere never evicts the prior occupant.
//! The operator gets a [`DuplicateNotice`] naming the slot the product already
//! holds and must remove it there first. Eviction only happens through a
//! slot-to-slot swap.

use crate::event::PlacementRequest;
use crate::store::{PlaceOutcome, SlotBoard};

/// Operator-facing warning for a refused duplicate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateNotice {
    /// 0-based index of the slot already holding the product.
    pub existing_slot: usize,
}

impl DuplicateNotice {
    /// 1-based slot position as shown to the operator.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.existing_slot + 1
    }

    /// Notice title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        "Product already pinned"
    }

    /// Notice body naming the occupied position.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "This product is already pinned in slot {}. A product can only occupy one slot. \
             Remove it from its current slot before placing it elsewhere.",
            self.position()
        )
    }
}

impl std::fmt::Display for DuplicateNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// How the engine reports a store outcome to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Silent success (placed or swapped).
    Accepted(PlaceOutcome),
    /// Refused; show the notice.
    Refused(DuplicateNotice),
}

/// Map a store outcome to its operator-facing resolution.
#[must_use]
pub fn resolve(outcome: PlaceOutcome) -> Resolution {
    match outcome {
        PlaceOutcome::Conflict { existing_slot } => {
            Resolution::Refused(DuplicateNotice { existing_slot })
        }
        accepted => Resolution::Accepted(accepted),
    }
}

/// Slot that would refuse `request` at `target`, without touching the board.
///
/// Used for hover feedback while a gesture is still in flight. Reordering
/// requests never conflict.
#[must_use]
pub fn precheck(board: &SlotBoard, request: &PlacementRequest, target: usize) -> Option<usize> {
    if request.is_reorder() {
        return None;
    }
    board
        .position_of(request.product.identity())
        .filter(|&existing| existing != target)
}
