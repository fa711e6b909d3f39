//! Fixtures shared by unit tests, integration tests and downstream crates.

use web_time::{Duration, Instant};

use crate::geometry::{Position, Rect};
use crate::hit_test::SlotRegions;
use crate::identity::Product;

/// Product with color code `"01"`.
#[must_use]
pub fn product(code: &str) -> Product {
    Product::new(code, "01").with_name(format!("Product {code}"))
}

/// `len` square slot regions of `size` pixels laid out in one row at y = 0.
#[must_use]
pub fn row_of_slots(len: usize, size: u32) -> SlotRegions {
    let mut regions = SlotRegions::new();
    for slot in 0..len {
        let x = i32::try_from(slot as u64 * u64::from(size)).unwrap_or(i32::MAX);
        regions.set(slot, Rect::new(x, 0, size, size));
    }
    regions
}

/// Center point of `slot` in a [`row_of_slots`] layout.
#[must_use]
pub fn slot_center(slot: usize, size: u32) -> Position {
    let half = i32::try_from(size / 2).unwrap_or(i32::MAX);
    let x = i32::try_from(slot as u64 * u64::from(size)).unwrap_or(i32::MAX);
    Position::new(x.saturating_add(half), half)
}

/// A point below every [`row_of_slots`] region.
#[must_use]
pub fn off_slots(size: u32) -> Position {
    Position::new(0, i32::try_from(size).unwrap_or(i32::MAX).saturating_mul(4))
}

/// Deterministic clock for gesture sequences.
#[derive(Debug, Clone, Copy)]
pub struct FakeClock {
    origin: Instant,
    elapsed: Duration,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Current instant.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    /// Advance by `ms` milliseconds and return the new instant.
    pub fn advance_ms(&mut self, ms: u64) -> Instant {
        self.elapsed += Duration::from_millis(ms);
        self.now()
    }
}
