#![forbid(unsafe_code)]

//! Native drag payload codec.
//!
//! A native drag carries its source through the host's data-transfer channel
//! as JSON: `{"product": {...}, "fromSlotIndex": 3 | null}`. Decoding happens
//! at drop time, so anything the host hands back may be garbage. A payload
//! that fails to decode abandons the placement; it is never surfaced to the
//! operator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::Product;

/// MIME type under which hosts store the payload.
pub const DRAG_PAYLOAD_MIME: &str = "application/json";

/// Errors from decoding a drag payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Malformed JSON or wrong field types.
    #[error("drag payload JSON error: {0}")]
    Json(String),
    /// Well-formed JSON without a product.
    #[error("drag payload has no product")]
    MissingProduct,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(default)]
    product: Option<Product>,
    #[serde(default)]
    from_slot_index: Option<usize>,
}

/// Source of a drag: the product being carried and, for a reordering drag,
/// the slot it was lifted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub product: Product,
    pub from_slot_index: Option<usize>,
}

impl DragPayload {
    /// Payload for a drag lifted from the catalog.
    #[must_use]
    pub fn from_catalog(product: Product) -> Self {
        Self {
            product,
            from_slot_index: None,
        }
    }

    /// Payload for a drag lifted from an occupied slot.
    #[must_use]
    pub fn from_slot(product: Product, slot: usize) -> Self {
        Self {
            product,
            from_slot_index: Some(slot),
        }
    }

    /// Decode a payload from the host's data-transfer string.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let raw: RawPayload =
            serde_json::from_str(json).map_err(|e| PayloadError::Json(e.to_string()))?;
        let product = raw.product.ok_or(PayloadError::MissingProduct)?;
        Ok(Self {
            product,
            from_slot_index: raw.from_slot_index,
        })
    }

    /// Encode the payload for the host's data-transfer channel.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        serde_json::to_string(self).map_err(|e| PayloadError::Json(e.to_string()))
    }
}
