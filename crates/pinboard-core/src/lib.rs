// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: the slot-assignment interaction engine for pinned collection
//! placements.
//!
//! # Role in Pinboard
//! `pinboard-core` owns every invariant of the pin editor. Hosts (the browser
//! adapter in `pinboard-web`, tests, replay tools) feed it gesture events and
//! catalog pages and render from its state.
//!
//! # Primary responsibilities
//! - **InteractionNormalizer**: one reducer turning click, native-drag and
//!   touch sequences into placement intents.
//! - **SlotBoard**: the fixed, ordered slot array and its uniqueness invariant.
//! - **Conflict handling**: refusal of duplicate placements with an
//!   operator-facing notice.
//! - **RemovalGate**: request → confirm/cancel → acknowledge for removals.
//! - **Submission**: ordered projection of the board for the save hand-off.
//!
//! # How it fits in the system
//! [`editor::PinEditor`] is the single owner wiring these together. The
//! only capability it needs from the outside is a [`hit_test::SlotHitTest`]
//! mapping points to slot indices; time is passed in explicitly so gesture
//! handling is deterministic.

pub mod catalog;
pub mod config;
pub mod confirm;
pub mod conflict;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod hit_test;
pub mod identity;
pub mod paging;
pub mod payload;
pub mod status;
pub mod store;
pub mod submission;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use editor::{PinEditor, Prompt};
pub use error::{PinboardError, Result};
pub use event::{GestureEvent, Placement, PlacementRequest};
pub use identity::{Product, ProductIdentity};
pub use store::{PlaceOutcome, SlotBoard};
