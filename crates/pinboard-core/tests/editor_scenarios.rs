//! End-to-end editor sessions driven through all three input families.

use pinboard_core::catalog::{CatalogPage, FilterSelection};
use pinboard_core::config::EditorConfig;
use pinboard_core::confirm::RemovalState;
use pinboard_core::conflict::{DuplicateNotice, Resolution};
use pinboard_core::event::DragSource;
use pinboard_core::store::PlaceOutcome;
use pinboard_core::identity::ProductIdentity;
use pinboard_core::submission::{PinnedEntry, RecordingCollaborator, serialize};
use pinboard_core::testing::{FakeClock, off_slots, product, row_of_slots, slot_center};
use pinboard_core::{GestureEvent, PinEditor, Prompt};
use pretty_assertions::assert_eq;

const SLOT_PX: u32 = 64;

fn editor_with_total(total: usize) -> PinEditor {
    let mut editor = PinEditor::new("summer-24", EditorConfig::default());
    editor.apply_catalog(CatalogPage::new(
        vec![product("P"), product("Q"), product("R")],
        total,
    ));
    editor
}

fn pinned_codes(editor: &PinEditor) -> Vec<Option<String>> {
    editor
        .board()
        .iter()
        .map(|(_, slot)| slot.map(|p| p.identity().product_code.clone()))
        .collect()
}

#[test]
fn duplicate_then_reorder_by_drag() {
    let mut editor = editor_with_total(3);
    let hit = row_of_slots(3, SLOT_PX);
    let mut clock = FakeClock::new();

    // Click-select P then slot 0.
    editor.handle(&GestureEvent::ProductClick(product("P")), clock.now(), &hit);
    let report = editor.handle(&GestureEvent::SlotClick { slot: 0 }, clock.advance_ms(300), &hit);
    assert_eq!(report.resolution, Some(Resolution::Accepted(PlaceOutcome::Placed)));

    // Dragging P from the catalog onto slot 2 is refused.
    let start = editor.handle(
        &GestureEvent::DragStart(DragSource::Catalog(product("P"))),
        clock.advance_ms(500),
        &hit,
    );
    let payload = start
        .dispatch
        .drag_payload
        .expect("native drag start carries a payload")
        .to_json()
        .unwrap();
    let report = editor.handle(
        &GestureEvent::Drop {
            slot: 2,
            payload: Some(payload),
        },
        clock.advance_ms(100),
        &hit,
    );
    assert_eq!(
        report.resolution,
        Some(Resolution::Refused(DuplicateNotice { existing_slot: 0 }))
    );
    assert_eq!(
        editor.prompt(),
        Some(Prompt::Duplicate(DuplicateNotice { existing_slot: 0 }))
    );
    assert_eq!(pinned_codes(&editor), vec![Some("P".into()), None, None]);
    editor.dismiss_prompt();

    // Dragging P from slot 0 to slot 2 is a reorder.
    editor.handle(&GestureEvent::DragStart(DragSource::Slot(0)), clock.now(), &hit);
    let report = editor.handle(
        &GestureEvent::Drop {
            slot: 2,
            payload: None,
        },
        clock.advance_ms(80),
        &hit,
    );
    assert_eq!(report.resolution, Some(Resolution::Accepted(PlaceOutcome::Swapped)));
    assert_eq!(pinned_codes(&editor), vec![None, None, Some("P".into())]);
    assert_eq!(editor.prompt(), None);
}

#[test]
fn touch_drag_swaps_two_pinned_products() {
    let mut editor = editor_with_total(4);
    let hit = row_of_slots(4, SLOT_PX);
    let mut clock = FakeClock::new();

    for (code, slot) in [("P", 0), ("Q", 3)] {
        editor.handle(&GestureEvent::ProductClick(product(code)), clock.now(), &hit);
        editor.handle(&GestureEvent::SlotClick { slot }, clock.advance_ms(50), &hit);
    }

    editor.handle(
        &GestureEvent::TouchStart {
            touch_id: 11,
            source: DragSource::Slot(0),
            pos: slot_center(0, SLOT_PX),
        },
        clock.advance_ms(1000),
        &hit,
    );
    editor.handle(
        &GestureEvent::TouchMove {
            touch_id: 11,
            pos: slot_center(3, SLOT_PX),
        },
        clock.advance_ms(60),
        &hit,
    );
    assert_eq!(editor.hovered_slot(), Some(3));
    // Moving an already-pinned product onto its swap partner is not a conflict.
    assert_eq!(editor.hover().and_then(|h| h.conflict), None);

    let report = editor.handle(
        &GestureEvent::TouchEnd {
            touch_id: 11,
            pos: slot_center(3, SLOT_PX),
        },
        clock.advance_ms(60),
        &hit,
    );
    assert!(report.mutated());
    assert_eq!(
        pinned_codes(&editor),
        vec![Some("Q".into()), None, None, Some("P".into())]
    );
    assert!(editor.hover().is_none());
}

#[test]
fn tap_on_catalog_card_never_places() {
    let mut editor = editor_with_total(3);
    let hit = row_of_slots(3, SLOT_PX);
    let mut clock = FakeClock::new();

    editor.handle(
        &GestureEvent::TouchStart {
            touch_id: 1,
            source: DragSource::Catalog(product("R")),
            pos: slot_center(1, SLOT_PX),
        },
        clock.now(),
        &hit,
    );
    let report = editor.handle(
        &GestureEvent::TouchEnd {
            touch_id: 1,
            pos: slot_center(1, SLOT_PX),
        },
        clock.advance_ms(120),
        &hit,
    );
    assert!(report.dispatch.placement.is_none());
    assert_eq!(editor.board().pinned_count(), 0);
}

#[test]
fn touch_released_off_slots_changes_nothing() {
    let mut editor = editor_with_total(3);
    let hit = row_of_slots(3, SLOT_PX);
    let mut clock = FakeClock::new();

    editor.handle(
        &GestureEvent::TouchStart {
            touch_id: 2,
            source: DragSource::Catalog(product("R")),
            pos: off_slots(SLOT_PX),
        },
        clock.now(),
        &hit,
    );
    let report = editor.handle(
        &GestureEvent::TouchEnd {
            touch_id: 2,
            pos: off_slots(SLOT_PX),
        },
        clock.advance_ms(900),
        &hit,
    );
    assert!(report.dispatch.placement.is_none());
    assert!(editor.armed().is_none());
}

#[test]
fn removal_cancel_then_confirm() {
    let mut editor = editor_with_total(3);
    let hit = row_of_slots(3, SLOT_PX);
    let clock = FakeClock::new();
    editor.handle(&GestureEvent::ProductClick(product("P")), clock.now(), &hit);
    editor.handle(&GestureEvent::SlotClick { slot: 1 }, clock.now(), &hit);

    editor.request_remove(1).unwrap();
    let state = editor.cancel_remove().unwrap().clone();
    assert_eq!(state, RemovalState::CancelledShown { slot: 1 });
    assert!(editor.is_pinned(&product("P")));
    editor.acknowledge_removal().unwrap();

    editor.request_remove(1).unwrap();
    let state = editor.confirm_remove().unwrap().clone();
    assert_eq!(
        state,
        RemovalState::SuccessShown {
            slot: 1,
            removed: Some(product("P")),
        }
    );
    assert_eq!(editor.board().pinned_count(), 0);
}

#[test]
fn total_change_with_armed_selection() {
    let mut editor = editor_with_total(4);
    let hit = row_of_slots(6, SLOT_PX);
    let clock = FakeClock::new();

    editor.handle(&GestureEvent::ProductClick(product("P")), clock.now(), &hit);
    editor.handle(&GestureEvent::SlotClick { slot: 2 }, clock.now(), &hit);
    editor.handle(&GestureEvent::ProductClick(product("Q")), clock.now(), &hit);

    assert!(editor.apply_catalog(CatalogPage::new(vec![product("Q")], 6)));
    assert_eq!(editor.board().len(), 6);
    assert_eq!(editor.board().pinned_count(), 0);
    assert!(editor.armed().is_none());

    let report = editor.handle(&GestureEvent::SlotClick { slot: 5 }, clock.now(), &hit);
    assert!(report.dispatch.is_ignored());
    assert_eq!(editor.board().pinned_count(), 0);
}

#[test]
fn save_hands_off_ordered_board_with_filters() {
    let mut editor = editor_with_total(5);
    let hit = row_of_slots(5, SLOT_PX);
    let clock = FakeClock::new();
    for (code, slot) in [("R", 4), ("P", 1)] {
        editor.handle(&GestureEvent::ProductClick(product(code)), clock.now(), &hit);
        editor.handle(&GestureEvent::SlotClick { slot }, clock.now(), &hit);
    }
    editor.set_filters(vec![FilterSelection::new("season", "summer")]);

    editor.request_save();
    let mut collaborator = RecordingCollaborator::default();
    let request = editor.confirm_save(&mut collaborator).unwrap();

    let order: Vec<(usize, &str)> = request
        .pinned_products
        .iter()
        .map(|p| (p.slot_index, p.product_code.as_str()))
        .collect();
    assert_eq!(order, vec![(1, "P"), (4, "R")]);
    let submitted: Vec<PinnedEntry> = request
        .pinned_products
        .iter()
        .map(|p| PinnedEntry {
            slot_index: p.slot_index,
            identity: ProductIdentity::new(&p.product_code, &p.color_code),
        })
        .collect();
    assert_eq!(submitted, serialize(editor.board()));
    assert_eq!(request.total_pinned_count, 2);
    assert_eq!(request.filters.len(), 1);
    assert_eq!(collaborator.submitted, vec![request]);
}
