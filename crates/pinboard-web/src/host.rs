#![forbid(unsafe_code)]

//! Host-facing wrapper around [`PinEditor`] for browser embeddings.
//!
//! The JS host owns the DOM and the network. It pushes encoded events with
//! their `event.timeStamp`, catalog responses and slot layouts; it reads back
//! drag payloads for `dataTransfer`, prompts to show and the save request to
//! POST. Everything crossing the boundary is JSON text.

use pinboard_core::catalog::{CatalogPage, CatalogQuery};
use pinboard_core::config::EditorConfig;
use pinboard_core::editor::EditorReport;
use pinboard_core::payload::{DRAG_PAYLOAD_MIME, PayloadError};
use pinboard_core::submission::{SaveCollaborator, SaveRequest};
use pinboard_core::{PinEditor, PinboardError, Prompt};
use serde::Serialize;
use thiserror::Error;
use web_time::{Duration, Instant};

use crate::input_parser::{InputParseError, parse_encoded_input};
use crate::regions::DomSlotRegions;

/// Errors surfaced to the JS host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Input(#[from] InputParseError),

    #[error("catalog response: {0}")]
    Catalog(String),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("encoding response: {0}")]
    Encode(String),

    #[error(transparent)]
    Editor(#[from] PinboardError),
}

/// What the host should do after one dispatched event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostUpdate {
    /// `(mime, json)` to store with `dataTransfer.setData` on a native drag
    /// start.
    pub drag_data: Option<(String, String)>,
    /// Whether the slot grid needs re-rendering.
    pub board_changed: bool,
    /// Prompt to show, if one is open after this event.
    pub prompt: Option<PromptView>,
}

/// Text for a modal prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub title: String,
    pub message: String,
}

impl PromptView {
    #[must_use]
    pub fn of(prompt: Prompt) -> Self {
        match prompt {
            Prompt::Duplicate(notice) => Self {
                title: notice.title().to_owned(),
                message: notice.message(),
            },
            Prompt::ConfirmSave => Self {
                title: "Save pinned products".to_owned(),
                message: "Save the current slot order for this collection?".to_owned(),
            },
            Prompt::ConfirmLeave => Self {
                title: "Discard changes".to_owned(),
                message: "Leave the editor? Unsaved pins will be lost.".to_owned(),
            },
        }
    }
}

/// Browser adapter owning one editor session and its slot regions.
#[derive(Debug)]
pub struct WebEditorHost {
    editor: PinEditor,
    regions: DomSlotRegions,
    origin: Instant,
    last: Instant,
}

impl WebEditorHost {
    #[must_use]
    pub fn new(collection_id: impl Into<String>, config: EditorConfig) -> Self {
        let origin = Instant::now();
        Self {
            editor: PinEditor::new(collection_id, config),
            regions: DomSlotRegions::new(),
            origin,
            last: origin,
        }
    }

    #[must_use]
    pub fn editor(&self) -> &PinEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PinEditor {
        &mut self.editor
    }

    #[must_use]
    pub fn regions(&self) -> &DomSlotRegions {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut DomSlotRegions {
        &mut self.regions
    }

    /// Map a DOM timestamp (ms since page load) onto the monotonic clock.
    ///
    /// Timestamps that are negative, non-finite or earlier than the previous
    /// one are clamped so gesture durations never go negative.
    fn instant_at(&mut self, timestamp_ms: f64) -> Instant {
        let offset = Duration::try_from_secs_f64(timestamp_ms / 1000.0).unwrap_or(Duration::ZERO);
        let at = (self.origin + offset).max(self.last);
        self.last = at;
        at
    }

    /// Decode and dispatch one encoded DOM event.
    ///
    /// Returns `Ok(None)` for event kinds with no gesture meaning.
    pub fn dispatch_json(
        &mut self,
        json: &str,
        timestamp_ms: f64,
    ) -> Result<Option<HostUpdate>, HostError> {
        let Some(event) = parse_encoded_input(json)? else {
            return Ok(None);
        };
        let now = self.instant_at(timestamp_ms);
        let report = self.editor.handle(&event, now, &self.regions);
        self.update_from(&report).map(Some)
    }

    fn update_from(&self, report: &EditorReport) -> Result<HostUpdate, HostError> {
        let drag_data = report
            .dispatch
            .drag_payload
            .as_ref()
            .map(|payload| payload.to_json().map(|json| (DRAG_PAYLOAD_MIME.to_owned(), json)))
            .transpose()?;
        Ok(HostUpdate {
            drag_data,
            board_changed: report.mutated(),
            prompt: self.editor.prompt().map(PromptView::of),
        })
    }

    /// Feed a catalog provider response (`{"products": [...], "totalCount": n}`).
    ///
    /// Returns `true` when the total changed and every pin was dropped.
    pub fn apply_catalog_json(&mut self, json: &str) -> Result<bool, HostError> {
        let page: CatalogPage =
            serde_json::from_str(json).map_err(|e| HostError::Catalog(e.to_string()))?;
        Ok(self.editor.apply_catalog(page))
    }

    /// Current catalog query as JSON for the catalog provider.
    pub fn query_json(&self) -> Result<String, HostError> {
        encode(&self.editor.query())
    }

    /// Query after a filter change, as JSON.
    pub fn set_filters_json(&mut self, json: &str) -> Result<String, HostError> {
        let filters = serde_json::from_str(json).map_err(|e| HostError::Catalog(e.to_string()))?;
        let query: CatalogQuery = self.editor.set_filters(filters);
        encode(&query)
    }

    /// Open prompt text, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<PromptView> {
        self.editor.prompt().map(PromptView::of)
    }

    /// Save request the current board would produce, pretty-printed.
    pub fn preview_save_json(&self) -> Result<String, HostError> {
        let editor = &self.editor;
        let request = SaveRequest::build(editor.collection_id(), editor.board(), editor.filters());
        request
            .to_json_pretty()
            .map_err(|e| HostError::Encode(e.to_string()))
    }

    /// Confirm the open save prompt and hand the request to `collaborator`.
    /// Returns the submitted request, pretty-printed.
    pub fn confirm_save_json(
        &mut self,
        collaborator: &mut dyn SaveCollaborator,
    ) -> Result<String, HostError> {
        let request = self.editor.confirm_save(collaborator)?;
        request
            .to_json_pretty()
            .map_err(|e| HostError::Encode(e.to_string()))
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, HostError> {
    serde_json::to_string(value).map_err(|e| HostError::Encode(e.to_string()))
}
