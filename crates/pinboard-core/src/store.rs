#![forbid(unsafe_code)]

//! Assignment store: the fixed-length, ordered slot array.
//!
//! [`SlotBoard`] is the single owner of slot occupancy. Nothing else writes a
//! slot; every mutation goes through [`place`](SlotBoard::place),
//! [`remove`](SlotBoard::remove) or [`reset`](SlotBoard::reset).
//!
//! # Invariants
//!
//! 1. Uniqueness: no two occupied slots hold the same
//!    [`ProductIdentity`](crate::identity::ProductIdentity).
//! 2. The length only changes through `reset`, which empties every slot.
//! 3. A rejected call (`Conflict` or `Err`) leaves the board unchanged.
//!
//! # Placement rules
//!
//! | request | target | result |
//! |---------|--------|--------|
//! | origin `o`, `o != target` | any | swap `o` and `target` → `Swapped` |
//! | origin `o`, `o == target` | any | no-op → `Swapped` |
//! | no origin, identity pinned at `k != target` | any | `Conflict { existing_slot: k }` |
//! | no origin, identity at `target` or absent | any | occupy `target` → `Placed` |

use thiserror::Error;

use crate::event::PlacementRequest;
use crate::identity::{Product, ProductIdentity};

/// Result of a [`SlotBoard::place`] call that reached the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The product now occupies the target slot.
    Placed,
    /// Occupants of the origin and target slots were exchanged.
    Swapped,
    /// The product is already pinned elsewhere; nothing changed.
    Conflict { existing_slot: usize },
}

impl PlaceOutcome {
    /// Whether the board accepted the request.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Conflict { .. })
    }
}

/// Errors from slot operations addressed at slots that do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("slot {slot} is out of range (board has {len} slots)")]
    SlotOutOfRange { slot: usize, len: usize },
}

/// Fixed, ordered array of slots, each holding at most one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBoard {
    slots: Vec<Option<Product>>,
}

impl SlotBoard {
    /// Create a board of `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the board has no slots at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupant of `slot`, if the slot exists and is occupied.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Product> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Iterate `(index, occupant)` over every slot in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&Product>)> + '_ {
        self.slots.iter().enumerate().map(|(i, s)| (i, s.as_ref()))
    }

    /// Iterate `(index, occupant)` over occupied slots in order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Product)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    /// Slots occupied by `identity`. At most one while the invariant holds.
    #[must_use]
    pub fn occupants_of(&self, identity: &ProductIdentity) -> Vec<usize> {
        self.occupied()
            .filter(|(_, p)| p.identity() == identity)
            .map(|(i, _)| i)
            .collect()
    }

    /// First slot holding `identity`.
    #[must_use]
    pub fn position_of(&self, identity: &ProductIdentity) -> Option<usize> {
        self.occupied()
            .find(|(_, p)| p.identity() == identity)
            .map(|(i, _)| i)
    }

    /// Whether `identity` is pinned anywhere.
    #[must_use]
    pub fn is_pinned(&self, identity: &ProductIdentity) -> bool {
        self.position_of(identity).is_some()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn pinned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn check(&self, slot: usize) -> Result<(), StoreError> {
        if slot < self.slots.len() {
            Ok(())
        } else {
            Err(StoreError::SlotOutOfRange {
                slot,
                len: self.slots.len(),
            })
        }
    }

    /// Place a request at `target`. See the module table for the rules.
    pub fn place(
        &mut self,
        request: &PlacementRequest,
        target: usize,
    ) -> Result<PlaceOutcome, StoreError> {
        self.check(target)?;

        if let Some(origin) = request.origin_slot {
            self.check(origin)?;
            if origin != target {
                self.slots.swap(origin, target);
                tracing::debug!(origin, target, "slots swapped");
            }
            return Ok(PlaceOutcome::Swapped);
        }

        if let Some(existing_slot) = self.position_of(request.product.identity())
            && existing_slot != target
        {
            tracing::debug!(
                identity = %request.product.identity(),
                existing_slot,
                target,
                "placement refused: already pinned"
            );
            return Ok(PlaceOutcome::Conflict { existing_slot });
        }

        self.slots[target] = Some(request.product.clone());
        tracing::debug!(identity = %request.product.identity(), target, "product placed");
        Ok(PlaceOutcome::Placed)
    }

    /// Swap the occupants of two slots.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), StoreError> {
        self.check(a)?;
        self.check(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Empty `slot`, returning its previous occupant.
    pub fn remove(&mut self, slot: usize) -> Result<Option<Product>, StoreError> {
        self.check(slot)?;
        let previous = self.slots[slot].take();
        tracing::debug!(slot, had_occupant = previous.is_some(), "slot cleared");
        Ok(previous)
    }

    /// Replace the board with `len` empty slots.
    pub fn reset(&mut self, len: usize) {
        let dropped = self.pinned_count();
        self.slots.clear();
        self.slots.resize(len, None);
        tracing::debug!(len, dropped, "slot board reset");
    }

    /// Check the uniqueness invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.slots.len());
        self.occupied().all(|(_, p)| seen.insert(p.identity()))
    }
}
