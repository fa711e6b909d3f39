#![forbid(unsafe_code)]

//! Projection of the slot board for the save hand-off.
//!
//! [`serialize`] is the pure, ordered `{slot_index, identity}` projection.
//! [`SaveRequest`] is built from exactly that projection, adding the
//! collection id, the active filters and display names for the external save
//! collaborator.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::FilterSelection;
use crate::identity::ProductIdentity;
use crate::store::SlotBoard;

/// One occupied slot in save order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedEntry {
    pub slot_index: usize,
    #[serde(flatten)]
    pub identity: ProductIdentity,
}

/// Occupied slots only, ascending slot index.
#[must_use]
pub fn serialize(board: &SlotBoard) -> Vec<PinnedEntry> {
    board
        .occupied()
        .map(|(slot_index, product)| PinnedEntry {
            slot_index,
            identity: product.identity().clone(),
        })
        .collect()
}

/// A pinned product as sent to the save collaborator: one [`PinnedEntry`]
/// plus its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedProduct {
    pub slot_index: usize,
    pub product_code: String,
    pub color_code: String,
    pub name: Option<String>,
}

/// Full save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub collection_id: String,
    pub pinned_products: Vec<PinnedProduct>,
    pub filters: Vec<FilterSelection>,
    pub total_pinned_count: usize,
}

impl SaveRequest {
    /// Build the request from the final board state.
    #[must_use]
    pub fn build(collection_id: &str, board: &SlotBoard, filters: &[FilterSelection]) -> Self {
        let pinned_products: Vec<PinnedProduct> = serialize(board)
            .into_iter()
            .map(|PinnedEntry { slot_index, identity }| PinnedProduct {
                name: board.get(slot_index).and_then(|p| p.name.clone()),
                slot_index,
                product_code: identity.product_code,
                color_code: identity.color_code,
            })
            .collect();
        Self {
            collection_id: collection_id.to_owned(),
            total_pinned_count: pinned_products.len(),
            pinned_products,
            filters: filters.to_vec(),
        }
    }

    /// Pretty JSON, as shown to the operator after saving.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Failure reported by the save collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("save rejected: {message}")]
pub struct SaveError {
    pub message: String,
}

impl SaveError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External collaborator that persists a [`SaveRequest`].
///
/// The engine only interprets success or failure.
pub trait SaveCollaborator {
    fn submit(&mut self, request: &SaveRequest) -> Result<(), SaveError>;
}

/// Collaborator that keeps every submitted request in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingCollaborator {
    pub submitted: Vec<SaveRequest>,
}

impl SaveCollaborator for RecordingCollaborator {
    fn submit(&mut self, request: &SaveRequest) -> Result<(), SaveError> {
        self.submitted.push(request.clone());
        Ok(())
    }
}
