#![forbid(unsafe_code)]

//! Interaction normalizer: folds click, native-drag and touch events into
//! placement intents.
//!
//! [`InteractionNormalizer`] is a single state-machine reducer. Every input
//! family enters through [`process`](InteractionNormalizer::process) and
//! leaves as at most one [`Placement`], so the convergence rules below are
//! enforced once for all three families.
//!
//! # State Machine
//!
//! - **Armed selection**: at most one [`Armed`] value. A catalog click arms
//!   `Selected`; a drag start (native or touch) arms `Dragging`. Arming one
//!   replaces the other.
//! - **Touch stream**: `TouchStart` records the start time and a `moved` flag.
//!   `TouchMove` sets `moved` (any move when the tolerance is 0) and
//!   hit-tests for hover feedback. `TouchEnd`
//!   shorter than the tap threshold without movement is a tap and places
//!   nothing.
//!
//! # Invariants
//!
//! 1. A completed gesture yields at most one placement.
//! 2. Every placement disarms, whatever the store later decides.
//! 3. Only one touch stream is tracked. A second `TouchStart`, a product
//!    click or a native drag start is ignored until the stream ends or is
//!    cancelled; events for other touch ids are ignored.
//! 4. Hover is `None` whenever no touch stream is active.
//! 5. After `Reset`, nothing is armed, hovered or tracked.
//!
//! # Failure Modes
//!
//! - A drop whose payload does not decode is abandoned and logged; the
//!   operator sees nothing because the gesture simply did not complete.
//! - A drag lifted from an empty slot is ignored.

use web_time::{Duration, Instant};

use crate::conflict;
use crate::event::{DragSource, GestureEvent, Placement, PlacementRequest};
use crate::geometry::Position;
use crate::hit_test::SlotHitTest;
use crate::identity::Product;
use crate::payload::{DragPayload, PayloadError};
use crate::store::SlotBoard;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Touches shorter than this without movement are taps (default: 200ms).
    pub tap_threshold: Duration,
    /// Manhattan distance (pixels) a touch may wander before it counts as
    /// moved. At 0 (the default) any move on the stream counts.
    pub move_tolerance: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_threshold: Duration::from_millis(200),
            move_tolerance: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Public state
// ---------------------------------------------------------------------------

/// Input family that armed a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Pointer,
    Touch,
}

/// The single pending placement source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Armed {
    /// A catalog product selected by click, waiting for a slot click.
    Selected(Product),
    /// A product mid-drag, optionally lifted from a slot.
    Dragging {
        product: Product,
        origin_slot: Option<usize>,
        modality: Modality,
    },
}

impl Armed {
    /// The armed product.
    #[must_use]
    pub fn product(&self) -> &Product {
        match self {
            Self::Selected(product) | Self::Dragging { product, .. } => product,
        }
    }

    /// Slot the product was lifted from, if any.
    #[must_use]
    pub fn origin_slot(&self) -> Option<usize> {
        match self {
            Self::Selected(_) => None,
            Self::Dragging { origin_slot, .. } => *origin_slot,
        }
    }

    /// Placement request this armed state would produce.
    #[must_use]
    pub fn to_request(&self) -> PlacementRequest {
        PlacementRequest {
            product: self.product().clone(),
            origin_slot: self.origin_slot(),
        }
    }

    fn into_request(self) -> PlacementRequest {
        match self {
            Self::Selected(product) => PlacementRequest::from_catalog(product),
            Self::Dragging {
                product,
                origin_slot,
                ..
            } => PlacementRequest {
                product,
                origin_slot,
            },
        }
    }
}

/// Slot highlighted under an in-flight touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub slot: usize,
    /// Slot that would refuse a drop here, for warning styling.
    pub conflict: Option<usize>,
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Slot click or drop with nothing armed.
    NothingArmed,
    /// Drag lifted from a slot with no occupant (or no such slot).
    EmptySourceSlot,
    /// Touch start, product click or drag start while a touch stream is in
    /// progress.
    TouchAlreadyActive,
    /// Touch move/end/cancel with no stream in progress.
    NoActiveTouch,
    /// Touch move/end/cancel for a stream other than the active one.
    TouchMismatch,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Armed,
    Disarmed,
    HoverUpdated,
    Placement,
    Ignored(IgnoredReason),
    /// Gesture abandoned because its drag payload did not decode.
    Abandoned(PayloadError),
}

/// Result of processing one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Placement to apply to the store, if the gesture completed.
    pub placement: Option<Placement>,
    /// Payload the host should store in its data-transfer channel (native
    /// drag start only).
    pub drag_payload: Option<DragPayload>,
    pub outcome: DispatchOutcome,
}

impl Dispatch {
    fn outcome(outcome: DispatchOutcome) -> Self {
        Self {
            placement: None,
            drag_payload: None,
            outcome,
        }
    }

    fn ignored(reason: IgnoredReason) -> Self {
        Self::outcome(DispatchOutcome::Ignored(reason))
    }

    fn placement(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            drag_payload: None,
            outcome: DispatchOutcome::Placement,
        }
    }

    /// Whether the event changed nothing.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Ignored(_))
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Tracks the active touch stream.
#[derive(Debug, Clone, Copy)]
struct TouchTracker {
    touch_id: u32,
    started_at: Instant,
    start_pos: Position,
    moved: bool,
}

// ---------------------------------------------------------------------------
// InteractionNormalizer
// ---------------------------------------------------------------------------

/// Stateful reducer from [`GestureEvent`]s to [`Placement`]s.
pub struct InteractionNormalizer {
    config: GestureConfig,
    armed: Option<Armed>,
    touch: Option<TouchTracker>,
    hover: Option<Hover>,
}

impl std::fmt::Debug for InteractionNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionNormalizer")
            .field("armed", &self.armed.as_ref().map(|a| a.product().identity()))
            .field("touch_id", &self.touch.map(|t| t.touch_id))
            .field("hover", &self.hover)
            .finish()
    }
}

impl Default for InteractionNormalizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl InteractionNormalizer {
    /// Create a normalizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            armed: None,
            touch: None,
            hover: None,
        }
    }

    /// Currently armed selection or drag.
    #[inline]
    #[must_use]
    pub fn armed(&self) -> Option<&Armed> {
        self.armed.as_ref()
    }

    /// Current hover highlight.
    #[inline]
    #[must_use]
    pub fn hover(&self) -> Option<Hover> {
        self.hover
    }

    /// Slot currently highlighted under a touch.
    #[inline]
    #[must_use]
    pub fn hovered_slot(&self) -> Option<usize> {
        self.hover.map(|h| h.slot)
    }

    /// Whether `product` is the armed product (for "selected" styling).
    #[must_use]
    pub fn is_armed(&self, product: &Product) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|a| a.product().identity() == product.identity())
    }

    /// Id of the touch stream in progress.
    #[inline]
    #[must_use]
    pub fn active_touch(&self) -> Option<u32> {
        self.touch.map(|t| t.touch_id)
    }

    /// Drop all armed, hover and touch state.
    pub fn reset(&mut self) {
        self.armed = None;
        self.touch = None;
        self.hover = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Process one event against the current board and hit surface.
    ///
    /// The board is only read: for resolving slot drag sources and for hover
    /// conflict previews.
    pub fn process(
        &mut self,
        event: &GestureEvent,
        now: Instant,
        board: &SlotBoard,
        hit: &dyn SlotHitTest,
    ) -> Dispatch {
        let dispatch = match event {
            GestureEvent::ProductClick(product) => self.on_product_click(product),
            GestureEvent::SlotClick { slot } => self.on_slot_click(*slot),
            GestureEvent::DragStart(source) => self.on_drag_start(source, board),
            GestureEvent::Drop { slot, payload } => self.on_drop(*slot, payload.as_deref()),
            GestureEvent::DragEnd => self.on_drag_end(),
            GestureEvent::TouchStart {
                touch_id,
                source,
                pos,
            } => self.on_touch_start(*touch_id, source, *pos, now, board),
            GestureEvent::TouchMove { touch_id, pos } => {
                self.on_touch_move(*touch_id, *pos, board, hit)
            }
            GestureEvent::TouchEnd { touch_id, pos } => {
                self.on_touch_end(*touch_id, *pos, now, hit)
            }
            GestureEvent::TouchCancel { touch_id } => self.on_touch_cancel(*touch_id),
            GestureEvent::Reset => {
                self.reset();
                Dispatch::outcome(DispatchOutcome::Disarmed)
            }
        };

        tracing::trace!(
            event = event.name(),
            outcome = ?dispatch.outcome,
            placement_target = dispatch.placement.as_ref().map(|p| p.target),
            "gesture dispatched"
        );
        dispatch
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl InteractionNormalizer {
    fn resolve_source(source: &DragSource, board: &SlotBoard) -> Option<(Product, Option<usize>)> {
        match source {
            DragSource::Catalog(product) => Some((product.clone(), None)),
            DragSource::Slot(slot) => board.get(*slot).map(|p| (p.clone(), Some(*slot))),
        }
    }

    fn on_product_click(&mut self, product: &Product) -> Dispatch {
        if self.touch.is_some() {
            return Dispatch::ignored(IgnoredReason::TouchAlreadyActive);
        }
        self.armed = Some(Armed::Selected(product.clone()));
        Dispatch::outcome(DispatchOutcome::Armed)
    }

    fn on_slot_click(&mut self, slot: usize) -> Dispatch {
        match self.armed.take() {
            Some(Armed::Selected(product)) => Dispatch::placement(Placement {
                request: PlacementRequest::from_catalog(product),
                target: slot,
            }),
            other => {
                self.armed = other;
                Dispatch::ignored(IgnoredReason::NothingArmed)
            }
        }
    }

    fn on_drag_start(&mut self, source: &DragSource, board: &SlotBoard) -> Dispatch {
        if self.touch.is_some() {
            return Dispatch::ignored(IgnoredReason::TouchAlreadyActive);
        }
        let Some((product, origin_slot)) = Self::resolve_source(source, board) else {
            return Dispatch::ignored(IgnoredReason::EmptySourceSlot);
        };
        let payload = DragPayload {
            product: product.clone(),
            from_slot_index: origin_slot,
        };
        self.armed = Some(Armed::Dragging {
            product,
            origin_slot,
            modality: Modality::Pointer,
        });
        Dispatch {
            placement: None,
            drag_payload: Some(payload),
            outcome: DispatchOutcome::Armed,
        }
    }

    fn on_drop(&mut self, slot: usize, payload: Option<&str>) -> Dispatch {
        let armed = self.armed.take();
        let request = match payload {
            Some(json) => match DragPayload::from_json(json) {
                Ok(payload) => PlacementRequest {
                    product: payload.product,
                    origin_slot: payload.from_slot_index,
                },
                Err(err) => {
                    tracing::warn!(slot, error = %err, "failed to decode drag payload");
                    return Dispatch::outcome(DispatchOutcome::Abandoned(err));
                }
            },
            None => match armed {
                Some(drag @ Armed::Dragging { .. }) => drag.into_request(),
                other => {
                    self.armed = other;
                    return Dispatch::ignored(IgnoredReason::NothingArmed);
                }
            },
        };
        Dispatch::placement(Placement {
            request,
            target: slot,
        })
    }

    fn on_drag_end(&mut self) -> Dispatch {
        if self.armed.take().is_some() {
            Dispatch::outcome(DispatchOutcome::Disarmed)
        } else {
            Dispatch::ignored(IgnoredReason::NothingArmed)
        }
    }

    fn on_touch_start(
        &mut self,
        touch_id: u32,
        source: &DragSource,
        pos: Position,
        now: Instant,
        board: &SlotBoard,
    ) -> Dispatch {
        if self.touch.is_some() {
            return Dispatch::ignored(IgnoredReason::TouchAlreadyActive);
        }
        let Some((product, origin_slot)) = Self::resolve_source(source, board) else {
            return Dispatch::ignored(IgnoredReason::EmptySourceSlot);
        };
        self.touch = Some(TouchTracker {
            touch_id,
            started_at: now,
            start_pos: pos,
            moved: false,
        });
        self.hover = None;
        self.armed = Some(Armed::Dragging {
            product,
            origin_slot,
            modality: Modality::Touch,
        });
        Dispatch::outcome(DispatchOutcome::Armed)
    }

    fn active_touch_for(&self, touch_id: u32) -> Result<TouchTracker, IgnoredReason> {
        match self.touch {
            None => Err(IgnoredReason::NoActiveTouch),
            Some(t) if t.touch_id != touch_id => Err(IgnoredReason::TouchMismatch),
            Some(t) => Ok(t),
        }
    }

    fn on_touch_move(
        &mut self,
        touch_id: u32,
        pos: Position,
        board: &SlotBoard,
        hit: &dyn SlotHitTest,
    ) -> Dispatch {
        let mut tracker = match self.active_touch_for(touch_id) {
            Ok(t) => t,
            Err(reason) => return Dispatch::ignored(reason),
        };
        let tolerance = self.config.move_tolerance;
        if tolerance == 0 || tracker.start_pos.manhattan_distance(pos) > tolerance {
            tracker.moved = true;
        }
        self.touch = Some(tracker);

        self.hover = hit.slot_at(pos).map(|slot| Hover {
            slot,
            conflict: self
                .armed
                .as_ref()
                .and_then(|a| conflict::precheck(board, &a.to_request(), slot)),
        });
        Dispatch::outcome(DispatchOutcome::HoverUpdated)
    }

    fn on_touch_end(
        &mut self,
        touch_id: u32,
        pos: Position,
        now: Instant,
        hit: &dyn SlotHitTest,
    ) -> Dispatch {
        let tracker = match self.active_touch_for(touch_id) {
            Ok(t) => t,
            Err(reason) => return Dispatch::ignored(reason),
        };
        self.touch = None;
        self.hover = None;
        let armed = self.armed.take();

        let elapsed = now.saturating_duration_since(tracker.started_at);
        if !tracker.moved && elapsed < self.config.tap_threshold {
            tracing::trace!(touch_id, elapsed_ms = elapsed.as_millis() as u64, "touch tap");
            return Dispatch::outcome(DispatchOutcome::Disarmed);
        }

        match (armed, hit.slot_at(pos)) {
            (Some(armed), Some(slot)) => Dispatch::placement(Placement {
                request: armed.into_request(),
                target: slot,
            }),
            _ => Dispatch::outcome(DispatchOutcome::Disarmed),
        }
    }

    fn on_touch_cancel(&mut self, touch_id: u32) -> Dispatch {
        if let Err(reason) = self.active_touch_for(touch_id) {
            return Dispatch::ignored(reason);
        }
        self.reset();
        Dispatch::outcome(DispatchOutcome::Disarmed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
