#![forbid(unsafe_code)]

//! `pinboard-web` adapts the pin editor to a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes JSON-encoded DOM events,
//!   catalog responses and measured slot layouts.
//! - **Deterministic time**: DOM `event.timeStamp` values are mapped onto a
//!   monotonic clock owned by the host wrapper.
//! - **No DOM access**: hit testing runs against rectangles the page measured,
//!   so everything here runs (and is tested) off the browser.
//!
//! This crate does not bind to `wasm-bindgen`; it provides the pieces a thin
//! binding layer wraps.

pub mod host;
pub mod input_parser;
pub mod regions;

pub use host::{HostError, HostUpdate, PromptView, WebEditorHost};
pub use input_parser::{InputParseError, parse_encoded_input};
pub use regions::{DomSlotRect, DomSlotRegions};
