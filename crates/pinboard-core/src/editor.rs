#![forbid(unsafe_code)]

//! Editor session: the single owner of slot state for one collection.
//!
//! [`PinEditor`] wires the normalizer, the slot board, the conflict resolver
//! and the removal gate together, and keeps the catalog-side state the engine
//! depends on (current page of products, total count, active filters, page
//! windows). Hosts feed it [`GestureEvent`]s and catalog pages and render
//! from its read accessors.
//!
//! # Invariants
//!
//! 1. The board is only mutated through `handle`, the removal gate,
//!    `apply_catalog` (reset on a new total) and `confirm_leave`.
//! 2. Any catalog arrival, filter change or catalog page change disarms the
//!    normalizer: the slots an armed gesture referred to may be gone.
//! 3. A refused placement opens a duplicate prompt and changes nothing else.

use std::ops::Range;

use web_time::Instant;

use crate::catalog::{CatalogPage, CatalogQuery, FilterSelection};
use crate::config::EditorConfig;
use crate::confirm::{RemovalGate, RemovalState};
use crate::conflict::{self, DuplicateNotice, Resolution};
use crate::error::{PinboardError, Result};
use crate::event::GestureEvent;
use crate::gesture::{Armed, Dispatch, Hover, InteractionNormalizer};
use crate::hit_test::SlotHitTest;
use crate::identity::Product;
use crate::paging::PageWindow;
use crate::status::ProductStatus;
use crate::store::{SlotBoard, StoreError};
use crate::submission::{SaveCollaborator, SaveRequest};

/// Modal prompt currently shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// A placement was refused.
    Duplicate(DuplicateNotice),
    /// "Save the pinned products?"
    ConfirmSave,
    /// "Discard changes and leave?"
    ConfirmLeave,
}

/// What one [`PinEditor::handle`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorReport {
    pub dispatch: Dispatch,
    /// Store resolution for the dispatched placement, if there was one.
    pub resolution: Option<Resolution>,
    /// Set when the placement addressed a slot that no longer exists.
    pub stale: Option<StoreError>,
}

impl EditorReport {
    /// Whether the board changed.
    #[must_use]
    pub fn mutated(&self) -> bool {
        matches!(self.resolution, Some(Resolution::Accepted(_)))
    }
}

/// Editor session for one collection.
#[derive(Debug)]
pub struct PinEditor {
    collection_id: String,
    config: EditorConfig,
    board: SlotBoard,
    normalizer: InteractionNormalizer,
    removal: RemovalGate,
    products: Vec<Product>,
    catalog_pages: PageWindow,
    pinned_pages: PageWindow,
    filters: Vec<FilterSelection>,
    prompt: Option<Prompt>,
}

impl PinEditor {
    /// Start an editor for `collection_id`. The board stays empty until the
    /// first catalog page reports a total.
    #[must_use]
    pub fn new(collection_id: impl Into<String>, config: EditorConfig) -> Self {
        Self {
            collection_id: collection_id.into(),
            normalizer: InteractionNormalizer::new(config.to_gesture_config()),
            board: SlotBoard::default(),
            removal: RemovalGate::new(),
            products: Vec::new(),
            catalog_pages: PageWindow::new(config.catalog.page_size, 0),
            pinned_pages: PageWindow::new(config.pinned.slots_per_page, 0),
            filters: Vec::new(),
            prompt: None,
            config,
        }
    }

    // --- read accessors ---

    #[must_use]
    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &SlotBoard {
        &self.board
    }

    /// Products on the current catalog page.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterSelection] {
        &self.filters
    }

    #[must_use]
    pub fn armed(&self) -> Option<&Armed> {
        self.normalizer.armed()
    }

    #[must_use]
    pub fn hover(&self) -> Option<Hover> {
        self.normalizer.hover()
    }

    /// Slot highlighted under the active touch.
    #[must_use]
    pub fn hovered_slot(&self) -> Option<usize> {
        self.normalizer.hovered_slot()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    #[must_use]
    pub fn removal_state(&self) -> &RemovalState {
        self.removal.state()
    }

    #[must_use]
    pub fn catalog_pages(&self) -> &PageWindow {
        &self.catalog_pages
    }

    #[must_use]
    pub fn pinned_pages(&self) -> &PageWindow {
        &self.pinned_pages
    }

    /// Whether `product` is pinned anywhere (badge / border state).
    #[must_use]
    pub fn is_pinned(&self, product: &Product) -> bool {
        self.board.is_pinned(product.identity())
    }

    /// Display status of a catalog card.
    #[must_use]
    pub fn status_of(&self, product: &Product) -> ProductStatus {
        ProductStatus::classify(product, self.is_pinned(product))
    }

    /// Slots on the current pinned page as `(global index, occupant)`.
    #[must_use]
    pub fn visible_slots(&self) -> Vec<(usize, Option<&Product>)> {
        let window = &self.pinned_pages;
        (0..window.range().len())
            .map(|local| {
                let slot = window.global_index(local);
                (slot, self.board.get(slot))
            })
            .collect()
    }

    /// Page numbers for the pinned-slot pager.
    #[must_use]
    pub fn pinned_pager(&self) -> Range<usize> {
        self.pinned_pages
            .visible_pages(self.config.pinned.pager_window)
    }

    /// Page numbers for the catalog pager.
    #[must_use]
    pub fn catalog_pager(&self) -> Range<usize> {
        self.catalog_pages
            .leading_pages(self.config.catalog.pager_window)
    }

    // --- gestures ---

    /// Feed one gesture event through the normalizer and apply any resulting
    /// placement.
    pub fn handle(
        &mut self,
        event: &GestureEvent,
        now: Instant,
        hit: &dyn SlotHitTest,
    ) -> EditorReport {
        let dispatch = self.normalizer.process(event, now, &self.board, hit);
        let mut report = EditorReport {
            dispatch,
            resolution: None,
            stale: None,
        };
        let Some(placement) = report.dispatch.placement.as_ref() else {
            return report;
        };

        match self.board.place(&placement.request, placement.target) {
            Ok(outcome) => {
                let resolution = conflict::resolve(outcome);
                if let Resolution::Refused(notice) = resolution {
                    tracing::info!(
                        identity = %placement.request.product.identity(),
                        existing_slot = notice.existing_slot,
                        target = placement.target,
                        "duplicate placement refused"
                    );
                    self.prompt = Some(Prompt::Duplicate(notice));
                }
                report.resolution = Some(resolution);
            }
            Err(err) => {
                tracing::debug!(error = %err, "placement dropped: stale slot");
                report.stale = Some(err);
            }
        }
        report
    }

    // --- catalog and filters ---

    /// Accept a catalog page from the provider.
    ///
    /// Returns `true` when the total changed and the board was reset, which
    /// discards every pin.
    pub fn apply_catalog(&mut self, page: CatalogPage) -> bool {
        let CatalogPage {
            products,
            total_count,
        } = page;
        self.products = products;
        self.normalizer.reset();
        self.catalog_pages.set_total_items(total_count);

        if total_count == 0 || total_count == self.board.len() {
            return false;
        }

        let dropped = self.board.pinned_count();
        if dropped > 0 {
            tracing::warn!(
                old_len = self.board.len(),
                new_len = total_count,
                dropped,
                "catalog total changed; pinned slots reset"
            );
        }
        self.board.reset(total_count);
        self.pinned_pages.set_total_items(total_count);
        true
    }

    /// Current catalog query.
    #[must_use]
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            collection_id: self.collection_id.clone(),
            page: self.catalog_pages.page(),
            page_size: self.catalog_pages.per_page(),
            filters: self.filters.clone(),
        }
    }

    /// Replace the active filters. Returns the query to fetch.
    pub fn set_filters(&mut self, filters: Vec<FilterSelection>) -> CatalogQuery {
        self.filters = filters;
        self.catalog_pages.set_page(1);
        self.normalizer.reset();
        self.query()
    }

    /// Drop one `(id, value)` filter. Returns the query to fetch.
    pub fn remove_filter(&mut self, id: &str, value: &str) -> CatalogQuery {
        self.filters.retain(|f| !f.matches(id, value));
        self.catalog_pages.set_page(1);
        self.normalizer.reset();
        self.query()
    }

    /// Move the catalog to `page`. Returns the query to fetch.
    pub fn set_catalog_page(&mut self, page: usize) -> CatalogQuery {
        self.catalog_pages.set_page(page);
        self.normalizer.reset();
        self.query()
    }

    // --- pinned paging ---

    pub fn set_pinned_page(&mut self, page: usize) {
        self.pinned_pages.set_page(page);
    }

    pub fn next_pinned_page(&mut self) -> bool {
        self.pinned_pages.next()
    }

    pub fn prev_pinned_page(&mut self) -> bool {
        self.pinned_pages.prev()
    }

    // --- removal ---

    /// Operator pressed "remove" on `slot`.
    pub fn request_remove(&mut self, slot: usize) -> Result<()> {
        self.removal.request(slot)?;
        Ok(())
    }

    /// Operator confirmed the pending removal.
    pub fn confirm_remove(&mut self) -> Result<&RemovalState> {
        Ok(self.removal.confirm(&mut self.board)?)
    }

    /// Operator cancelled the pending removal.
    pub fn cancel_remove(&mut self) -> Result<&RemovalState> {
        Ok(self.removal.cancel()?)
    }

    /// Operator dismissed the removal notice.
    pub fn acknowledge_removal(&mut self) -> Result<()> {
        self.removal.acknowledge()?;
        Ok(())
    }

    // --- prompts, save and leave ---

    /// Close the duplicate warning (or any prompt) without acting on it.
    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    /// Operator pressed "save".
    pub fn request_save(&mut self) {
        self.prompt = Some(Prompt::ConfirmSave);
    }

    /// Operator confirmed saving: hand the request to `collaborator`.
    ///
    /// The prompt closes whether or not the collaborator accepts.
    pub fn confirm_save(
        &mut self,
        collaborator: &mut dyn SaveCollaborator,
    ) -> Result<SaveRequest> {
        if self.prompt != Some(Prompt::ConfirmSave) {
            return Err(PinboardError::prompt_not_open("save"));
        }
        self.prompt = None;
        let request = SaveRequest::build(&self.collection_id, &self.board, &self.filters);
        collaborator.submit(&request).inspect_err(|err| {
            tracing::warn!(collection_id = %self.collection_id, error = %err, "save failed");
        })?;
        tracing::info!(
            collection_id = %self.collection_id,
            pinned = request.total_pinned_count,
            "pinned products saved"
        );
        Ok(request)
    }

    /// Operator pressed "cancel" on the editor.
    pub fn request_leave(&mut self) {
        self.prompt = Some(Prompt::ConfirmLeave);
    }

    /// Operator confirmed leaving: discard the session's slot state.
    pub fn confirm_leave(&mut self) -> Result<()> {
        if self.prompt != Some(Prompt::ConfirmLeave) {
            return Err(PinboardError::prompt_not_open("leave"));
        }
        self.prompt = None;
        self.normalizer.reset();
        self.board.reset(0);
        self.pinned_pages.set_total_items(0);
        Ok(())
    }
}
