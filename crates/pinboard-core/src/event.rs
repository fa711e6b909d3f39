#![forbid(unsafe_code)]

//! Canonical gesture events and the placement intent they reduce to.
//!
//! Every input family (click, native drag, touch) is expressed as a
//! [`GestureEvent`]. The normalizer folds a sequence of them into at most one
//! [`Placement`] per completed gesture.
//!
//! # Invariants
//! 1. A touch stream is well-formed: `TouchStart` → zero or more `TouchMove`
//!    → exactly one of `TouchEnd` or `TouchCancel`, all with the same id.
//! 2. A [`PlacementRequest`] with an `origin_slot` is a reordering request; one
//!    without is a catalog placement.

use crate::geometry::Position;
use crate::identity::Product;

/// Where a drag (native or touch) was lifted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A catalog card.
    Catalog(Product),
    /// A slot; its occupant is resolved against the board at drag start.
    Slot(usize),
}

/// Raw input, already classified by family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEvent {
    // === Click ===
    /// A catalog card was clicked.
    ProductClick(Product),
    /// A slot was clicked.
    SlotClick { slot: usize },

    // === Native drag ===
    /// Native drag started.
    DragStart(DragSource),
    /// Native drop on a slot. `payload` is the host's data-transfer string;
    /// `None` means the host did not forward one and the armed drag is used.
    Drop { slot: usize, payload: Option<String> },
    /// Native drag ended (after a drop, or without one).
    DragEnd,

    // === Touch ===
    TouchStart {
        touch_id: u32,
        source: DragSource,
        pos: Position,
    },
    TouchMove { touch_id: u32, pos: Position },
    TouchEnd { touch_id: u32, pos: Position },
    TouchCancel { touch_id: u32 },

    // === Session ===
    /// The catalog or slot count changed under the operator; drop any armed
    /// state.
    Reset,
}

impl GestureEvent {
    /// Short name used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProductClick(_) => "product_click",
            Self::SlotClick { .. } => "slot_click",
            Self::DragStart(_) => "drag_start",
            Self::Drop { .. } => "drop",
            Self::DragEnd => "drag_end",
            Self::TouchStart { .. } => "touch_start",
            Self::TouchMove { .. } => "touch_move",
            Self::TouchEnd { .. } => "touch_end",
            Self::TouchCancel { .. } => "touch_cancel",
            Self::Reset => "reset",
        }
    }
}

/// What to place, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub product: Product,
    /// Slot the product was lifted from, for reordering drags.
    pub origin_slot: Option<usize>,
}

impl PlacementRequest {
    /// A catalog placement.
    #[must_use]
    pub fn from_catalog(product: Product) -> Self {
        Self {
            product,
            origin_slot: None,
        }
    }

    /// A reordering placement lifted from `slot`.
    #[must_use]
    pub fn from_slot(product: Product, slot: usize) -> Self {
        Self {
            product,
            origin_slot: Some(slot),
        }
    }

    /// Whether this request reorders existing pins.
    #[must_use]
    pub const fn is_reorder(&self) -> bool {
        self.origin_slot.is_some()
    }
}

/// A completed gesture: place `request` at `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub request: PlacementRequest,
    pub target: usize,
}
