#![forbid(unsafe_code)]

//! JSON input parser for converting host-encoded DOM events to
//! [`GestureEvent`] values.
//!
//! The JS side forwards one small JSON object per DOM event:
//!
//! ```json
//! {"kind": "touch_move", "touchId": 3, "x": 120.5, "y": 48}
//! ```
//!
//! | kind | required fields | optional |
//! |------|-----------------|----------|
//! | `product_click` | `product` | |
//! | `slot_click` | `slot` | |
//! | `drag_start` | `product` xor `slot` | |
//! | `drop` | `slot` | `payload` |
//! | `drag_end` | | |
//! | `touch_start` | `touchId`, `x`, `y`, `product` xor `slot` | |
//! | `touch_move` / `touch_end` | `touchId`, `x`, `y` | |
//! | `touch_cancel` | `touchId` | |
//!
//! Unknown kinds return `Ok(None)` so hosts can forward events this crate
//! does not care about without filtering.

use pinboard_core::event::DragSource;
use pinboard_core::geometry::Position;
use pinboard_core::{GestureEvent, Product};
use serde::Deserialize;
use thiserror::Error;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(String),
    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// A drag source named both a catalog product and a slot.
    #[error("drag source must be either a product or a slot, not both")]
    AmbiguousSource,
    /// Coordinate was not a finite number.
    #[error("coordinate {0} is not finite")]
    NonFiniteCoordinate(&'static str),
}

/// Internal deserialization target for the host's JSON schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInput {
    kind: String,
    #[serde(default)]
    product: Option<Product>,
    #[serde(default)]
    slot: Option<usize>,
    #[serde(default)]
    touch_id: Option<u32>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    payload: Option<String>,
}

/// Parse one JSON-encoded DOM event into a [`GestureEvent`].
///
/// Returns `Ok(None)` for kinds with no gesture meaning.
/// Returns `Err` for malformed JSON or missing required fields.
pub fn parse_encoded_input(json: &str) -> Result<Option<GestureEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    let event = match raw.kind.as_str() {
        "product_click" => GestureEvent::ProductClick(require(raw.product, "product")?),
        "slot_click" => GestureEvent::SlotClick {
            slot: require(raw.slot, "slot")?,
        },
        "drag_start" => GestureEvent::DragStart(parse_source(raw.product, raw.slot)?),
        "drop" => GestureEvent::Drop {
            slot: require(raw.slot, "slot")?,
            payload: raw.payload.filter(|p| !p.is_empty()),
        },
        "drag_end" => GestureEvent::DragEnd,
        "touch_start" => GestureEvent::TouchStart {
            touch_id: require(raw.touch_id, "touchId")?,
            pos: parse_position(raw.x, raw.y)?,
            source: parse_source(raw.product, raw.slot)?,
        },
        "touch_move" => GestureEvent::TouchMove {
            touch_id: require(raw.touch_id, "touchId")?,
            pos: parse_position(raw.x, raw.y)?,
        },
        "touch_end" => GestureEvent::TouchEnd {
            touch_id: require(raw.touch_id, "touchId")?,
            pos: parse_position(raw.x, raw.y)?,
        },
        "touch_cancel" => GestureEvent::TouchCancel {
            touch_id: require(raw.touch_id, "touchId")?,
        },
        _ => return Ok(None),
    };
    Ok(Some(event))
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, InputParseError> {
    value.ok_or(InputParseError::MissingField(field))
}

fn parse_source(
    product: Option<Product>,
    slot: Option<usize>,
) -> Result<DragSource, InputParseError> {
    match (product, slot) {
        (Some(product), None) => Ok(DragSource::Catalog(product)),
        (None, Some(slot)) => Ok(DragSource::Slot(slot)),
        (Some(_), Some(_)) => Err(InputParseError::AmbiguousSource),
        (None, None) => Err(InputParseError::MissingField("product")),
    }
}

fn parse_position(x: Option<f64>, y: Option<f64>) -> Result<Position, InputParseError> {
    Ok(Position::new(
        coordinate(require(x, "x")?, "x")?,
        coordinate(require(y, "y")?, "y")?,
    ))
}

/// CSS pixels arrive fractional; round to the nearest whole pixel.
fn coordinate(value: f64, field: &'static str) -> Result<i32, InputParseError> {
    if !value.is_finite() {
        return Err(InputParseError::NonFiniteCoordinate(field));
    }
    // `as` saturates for out-of-range floats.
    Ok(value.round() as i32)
}
