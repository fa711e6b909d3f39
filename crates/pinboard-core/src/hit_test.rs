#![forbid(unsafe_code)]

//! Injected hit-testing capability.
//!
//! The normalizer never queries a document or widget tree itself. Hosts hand
//! it a [`SlotHitTest`] that maps a point to the slot index under it.

use crate::geometry::{Position, Rect};

/// Maps a viewport point to the slot index rendered under it.
pub trait SlotHitTest {
    /// Slot index under `pos`, or `None` if the point is over no slot.
    fn slot_at(&self, pos: Position) -> Option<usize>;
}

impl<F> SlotHitTest for F
where
    F: Fn(Position) -> Option<usize>,
{
    fn slot_at(&self, pos: Position) -> Option<usize> {
        self(pos)
    }
}

/// Hit surface that never reports a slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSlots;

impl SlotHitTest for NoSlots {
    fn slot_at(&self, _pos: Position) -> Option<usize> {
        None
    }
}

/// Rectangle-backed hit surface.
///
/// Regions are searched last-registered first, so a region registered later
/// (drawn on top) wins where two overlap.
#[derive(Debug, Clone, Default)]
pub struct SlotRegions {
    regions: Vec<(usize, Rect)>,
}

impl SlotRegions {
    /// Create an empty set of regions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the region for `slot`.
    pub fn set(&mut self, slot: usize, rect: Rect) {
        self.regions.retain(|(s, _)| *s != slot);
        self.regions.push((slot, rect));
    }

    /// Forget the region for `slot`.
    pub fn remove(&mut self, slot: usize) {
        self.regions.retain(|(s, _)| *s != slot);
    }

    /// Forget all regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no regions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl SlotHitTest for SlotRegions {
    fn slot_at(&self, pos: Position) -> Option<usize> {
        self.regions
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(slot, _)| *slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_hit_surface() {
        let hit = |pos: Position| (pos.x >= 0).then_some(pos.x as usize / 100);
        assert_eq!(hit.slot_at(Position::new(250, 0)), Some(2));
        assert_eq!(hit.slot_at(Position::new(-1, 0)), None);
    }

    #[test]
    fn regions_resolve_points() {
        let mut regions = SlotRegions::new();
        regions.set(0, Rect::new(0, 0, 100, 100));
        regions.set(1, Rect::new(100, 0, 100, 100));
        assert_eq!(regions.slot_at(Position::new(50, 50)), Some(0));
        assert_eq!(regions.slot_at(Position::new(150, 50)), Some(1));
        assert_eq!(regions.slot_at(Position::new(250, 50)), None);
    }

    #[test]
    fn later_region_wins_overlap() {
        let mut regions = SlotRegions::new();
        regions.set(0, Rect::new(0, 0, 100, 100));
        regions.set(7, Rect::new(50, 50, 100, 100));
        assert_eq!(regions.slot_at(Position::new(60, 60)), Some(7));
    }

    #[test]
    fn set_replaces_existing_region() {
        let mut regions = SlotRegions::new();
        regions.set(3, Rect::new(0, 0, 10, 10));
        regions.set(3, Rect::new(100, 100, 10, 10));
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.slot_at(Position::new(5, 5)), None);
        assert_eq!(regions.slot_at(Position::new(105, 105)), Some(3));
    }

    #[test]
    fn remove_and_clear() {
        let mut regions = SlotRegions::new();
        regions.set(0, Rect::new(0, 0, 10, 10));
        regions.set(1, Rect::new(10, 0, 10, 10));
        regions.remove(0);
        assert_eq!(regions.slot_at(Position::new(5, 5)), None);
        regions.clear();
        assert!(regions.is_empty());
        assert_eq!(NoSlots.slot_at(Position::new(0, 0)), None);
    }
}
