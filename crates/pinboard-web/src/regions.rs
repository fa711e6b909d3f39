#![forbid(unsafe_code)]

//! Slot hit regions reported by the browser.
//!
//! After each layout the JS host measures every rendered slot element with
//! `getBoundingClientRect()` and sends the list here. Touch coordinates and
//! client rects share the same viewport space, so no scroll offset is applied.

use pinboard_core::geometry::{Position, Rect};
use pinboard_core::hit_test::{SlotHitTest, SlotRegions};
use serde::Deserialize;

use crate::input_parser::InputParseError;

/// A slot element's client rectangle, in fractional CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSlotRect {
    /// Global slot index rendered by this element.
    pub slot: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DomSlotRect {
    /// Smallest whole-pixel rectangle covering this one. Degenerate or
    /// non-finite rects become empty.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        let finite = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Rect::default();
        }
        let left = self.left.floor();
        let top = self.top.floor();
        let right = (self.left + self.width).ceil();
        let bottom = (self.top + self.height).ceil();
        Rect::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }
}

/// [`SlotHitTest`] backed by measured DOM rectangles.
///
/// Only slots currently rendered (the visible pinned page) have regions, so
/// a touch over a slot on another page can never be resolved.
#[derive(Debug, Clone, Default)]
pub struct DomSlotRegions {
    inner: SlotRegions,
}

impl DomSlotRegions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all regions with a freshly measured layout.
    pub fn replace(&mut self, rects: &[DomSlotRect]) {
        self.inner.clear();
        for rect in rects {
            self.update(rect);
        }
        tracing::trace!(regions = self.inner.len(), "slot regions replaced");
    }

    /// Replace all regions from the host's JSON array of slot rects.
    pub fn replace_from_json(&mut self, json: &str) -> Result<usize, InputParseError> {
        let rects: Vec<DomSlotRect> =
            serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;
        self.replace(&rects);
        Ok(self.inner.len())
    }

    /// Register or re-measure one slot.
    pub fn update(&mut self, rect: &DomSlotRect) {
        let bounds = rect.to_rect();
        if bounds.is_empty() {
            self.inner.remove(rect.slot);
        } else {
            self.inner.set(rect.slot, bounds);
        }
    }

    /// Forget every region, e.g. while the slot grid is hidden.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SlotHitTest for DomSlotRegions {
    fn slot_at(&self, pos: Position) -> Option<usize> {
        self.inner.slot_at(pos)
    }
}
