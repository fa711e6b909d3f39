#![forbid(unsafe_code)]

//! Two-step confirmation for removing a product from a slot.
//!
//! ```text
//! Idle ─request(i)─▶ RemoveRequested(i) ─confirm─▶ SuccessShown(i) ─ack─▶ Idle
//!                                        └─cancel─▶ CancelledShown(i) ─ack─▶ Idle
//! ```
//!
//! The slot index is captured when removal is requested and trusted when it
//! is confirmed: other slots may change in between and the originally
//! requested slot is still the one cleared. The gate has no timeout.

use thiserror::Error;

use crate::identity::Product;
use crate::store::{SlotBoard, StoreError};

/// State of the removal gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemovalState {
    #[default]
    Idle,
    /// Waiting for the operator to confirm or cancel.
    RemoveRequested { slot: usize },
    /// Removal done; success notice shown.
    SuccessShown { slot: usize, removed: Option<Product> },
    /// Operator cancelled; cancellation notice shown.
    CancelledShown { slot: usize },
    /// The store refused the removal; error notice shown.
    FailedShown { slot: usize, error: StoreError },
}

impl RemovalState {
    /// Whether a terminal notice is waiting for acknowledgement.
    #[must_use]
    pub const fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::SuccessShown { .. } | Self::CancelledShown { .. } | Self::FailedShown { .. }
        )
    }

    /// Slot the current flow is about, if any.
    #[must_use]
    pub const fn slot(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::RemoveRequested { slot }
            | Self::SuccessShown { slot, .. }
            | Self::CancelledShown { slot }
            | Self::FailedShown { slot, .. } => Some(*slot),
        }
    }
}

/// Misuse of the gate protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("a removal flow is already in progress")]
    Busy,
    #[error("no removal has been requested")]
    NothingRequested,
    #[error("no removal notice to acknowledge")]
    NothingToAcknowledge,
}

/// Removal confirmation gate.
#[derive(Debug, Clone, Default)]
pub struct RemovalGate {
    state: RemovalState,
}

impl RemovalGate {
    /// Create an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &RemovalState {
        &self.state
    }

    /// Whether the gate is idle.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == RemovalState::Idle
    }

    /// Slot awaiting confirmation.
    #[must_use]
    pub fn pending_slot(&self) -> Option<usize> {
        match self.state {
            RemovalState::RemoveRequested { slot } => Some(slot),
            _ => None,
        }
    }

    /// Operator asked to remove `slot`.
    pub fn request(&mut self, slot: usize) -> Result<(), GateError> {
        if !self.is_idle() {
            return Err(GateError::Busy);
        }
        self.state = RemovalState::RemoveRequested { slot };
        tracing::debug!(slot, "removal requested");
        Ok(())
    }

    /// Operator confirmed: clear the captured slot on `board`.
    pub fn confirm(&mut self, board: &mut SlotBoard) -> Result<&RemovalState, GateError> {
        let slot = self.pending_slot().ok_or(GateError::NothingRequested)?;
        self.state = match board.remove(slot) {
            Ok(removed) => {
                tracing::debug!(slot, "removal confirmed");
                RemovalState::SuccessShown { slot, removed }
            }
            Err(error) => {
                tracing::warn!(slot, %error, "confirmed removal failed");
                RemovalState::FailedShown { slot, error }
            }
        };
        Ok(&self.state)
    }

    /// Operator cancelled the removal.
    pub fn cancel(&mut self) -> Result<&RemovalState, GateError> {
        let slot = self.pending_slot().ok_or(GateError::NothingRequested)?;
        self.state = RemovalState::CancelledShown { slot };
        tracing::debug!(slot, "removal cancelled");
        Ok(&self.state)
    }

    /// Operator dismissed the terminal notice.
    pub fn acknowledge(&mut self) -> Result<(), GateError> {
        if !self.state.is_notice() {
            return Err(GateError::NothingToAcknowledge);
        }
        self.state = RemovalState::Idle;
        Ok(())
    }
}
