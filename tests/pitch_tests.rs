use lineup::catalog::{self, SquadSize};
use lineup::error::LineupError;
use lineup::geometry::PitchRect;
use lineup::lineup_protocol::Slot;
use lineup::pitch::{ModalMode, PitchEditor, SearchHint};
use lineup::search::SearchEffect;
use std::sync::{Arc, Mutex};

mod common;

fn editor() -> PitchEditor {
    PitchEditor::new(catalog::default_formation(SquadSize::Eleven), false, 3)
}

#[test]
fn test_drag_to_corner_clamps_to_marker_band() {
    let mut pitch = editor();
    let rect = PitchRect::new(100.0, 50.0, 400.0, 600.0);

    pitch.drag_slot(3, &rect, 100.0, 50.0).unwrap();
    assert_eq!((pitch.slots()[3].x, pitch.slots()[3].y), (5.0, 5.0));

    pitch.drag_slot(3, &rect, 10_000.0, -300.0).unwrap();
    assert_eq!((pitch.slots()[3].x, pitch.slots()[3].y), (95.0, 5.0));

    pitch.drag_slot(3, &rect, 300.0, 350.0).unwrap();
    assert_eq!((pitch.slots()[3].x, pitch.slots()[3].y), (50.0, 50.0));
}

#[test]
fn test_drag_only_moves_the_dragged_slot() {
    let mut pitch = editor();
    let before = pitch.slots().to_vec();

    pitch.place_slot(2, 40.0, 60.0).unwrap();

    for (i, (now, was)) in pitch.slots().iter().zip(&before).enumerate() {
        if i == 2 {
            assert_eq!((now.x, now.y), (40.0, 60.0));
            assert_eq!(now.role, was.role);
        } else {
            assert_eq!(now, was);
        }
    }
}

#[test]
fn test_degenerate_rect_does_not_produce_nan() {
    let mut pitch = editor();
    pitch
        .drag_slot(0, &PitchRect::new(0.0, 0.0, 0.0, 0.0), 10.0, 10.0)
        .unwrap();
    assert!(!pitch.slots()[0].x.is_nan());
    assert!(!pitch.slots()[0].y.is_nan());
}

#[test]
fn test_drag_out_of_range_index() {
    let mut pitch = editor();
    let err = pitch.place_slot(11, 50.0, 50.0).unwrap_err();
    assert!(matches!(err, LineupError::SlotOutOfRange { index: 11, len: 11 }));
}

#[test]
fn test_observers_see_every_change() {
    let mut pitch = editor();
    let seen: Arc<Mutex<Vec<Vec<Slot>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    pitch.add_observer(Box::new(move |slots: &[Slot]| {
        sink.lock().unwrap().push(slots.to_vec());
    }));

    pitch.place_slot(0, 20.0, 20.0).unwrap();
    pitch.open_editor(0).unwrap();
    pitch
        .bind_player(common::player(9, "Alisson", "Liverpool"))
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0][0].x, 20.0);
    assert!(seen[1][0].is_bound());
}

#[test]
fn test_modal_state_machine() {
    let mut pitch = editor();
    assert_eq!(pitch.modal_mode(), ModalMode::Closed);

    assert_eq!(pitch.open_editor(5).unwrap(), SearchEffect::Cancel);
    assert_eq!(pitch.modal_mode(), ModalMode::Searching);
    assert_eq!(pitch.search_hint(), Some(SearchHint::Idle));

    pitch
        .bind_player(common::player(1, "Neymar", "Santos"))
        .unwrap();
    assert_eq!(pitch.modal_mode(), ModalMode::Bound);
    assert_eq!(pitch.session().unwrap().query(), "");

    pitch.clear_player().unwrap();
    assert_eq!(pitch.modal_mode(), ModalMode::Searching);
    assert!(pitch.slots()[5].player.is_none());

    // Presses inside the modal keep it open
    assert_eq!(pitch.pointer_down(true), None);
    assert_eq!(pitch.modal_mode(), ModalMode::Searching);

    assert_eq!(pitch.pointer_down(false), Some(SearchEffect::Cancel));
    assert_eq!(pitch.modal_mode(), ModalMode::Closed);
    assert_eq!(pitch.close_editor(), None);
}

#[test]
fn test_reopening_a_bound_slot_shows_bound_mode() {
    let mut pitch = editor();
    pitch.open_editor(1).unwrap();
    pitch
        .bind_player(common::player(1, "Neymar", "Santos"))
        .unwrap();
    pitch.close_editor();

    pitch.open_editor(1).unwrap();
    assert_eq!(pitch.modal_mode(), ModalMode::Bound);
    pitch.open_editor(2).unwrap();
    assert_eq!(pitch.modal_mode(), ModalMode::Searching);
}

#[test]
fn test_binding_requires_open_editor() {
    let mut pitch = editor();
    let err = pitch
        .bind_player(common::player(1, "Neymar", "Santos"))
        .unwrap_err();
    assert!(matches!(err, LineupError::NoEditingSession));
    assert!(matches!(
        pitch.set_query("ney").unwrap_err(),
        LineupError::NoEditingSession
    ));
}

#[test]
fn test_short_query_never_schedules() {
    let mut pitch = editor();
    pitch.open_editor(0).unwrap();

    assert_eq!(pitch.set_query("ne").unwrap(), SearchEffect::Cancel);
    assert_eq!(pitch.search_hint(), Some(SearchHint::TypeMore));

    // Every typed character counts, whitespace included, and is sent as typed
    for text in ["ne ", " neymar"] {
        match pitch.set_query(text).unwrap() {
            SearchEffect::Schedule(ticket) => {
                assert_eq!(ticket.query, text);
                assert_eq!(ticket.generation, pitch.session().unwrap().generation());
            }
            other => panic!("expected a scheduled search for {:?}, got {:?}", text, other),
        }
        assert_eq!(pitch.search_hint(), Some(SearchHint::Waiting));
    }
}

#[test]
fn test_bind_then_clear_keeps_role_and_position() {
    let mut pitch = editor();
    pitch.place_slot(3, 33.0, 44.0).unwrap();
    let role = pitch.slots()[3].role.clone();

    pitch.open_editor(3).unwrap();
    pitch
        .bind_player(common::player(1, "Neymar", "Santos"))
        .unwrap();
    assert!(pitch.slots()[3].is_bound());
    pitch.clear_player().unwrap();

    let slot = &pitch.slots()[3];
    assert!(slot.player.is_none());
    assert_eq!((slot.x, slot.y), (33.0, 44.0));
    assert_eq!(slot.role, role);
}

#[test]
fn test_dragging_a_bound_slot_keeps_its_player() {
    let mut pitch = editor();
    pitch.open_editor(7).unwrap();
    pitch
        .bind_player(common::player(2, "Nedved", "Juventus"))
        .unwrap();
    pitch.close_editor();

    let rect = PitchRect::new(0.0, 0.0, 400.0, 600.0);
    pitch.drag_slot(7, &rect, 100.0, 450.0).unwrap();

    let slot = &pitch.slots()[7];
    assert_eq!((slot.x, slot.y), (25.0, 75.0));
    assert_eq!(slot.player.as_ref().unwrap().short_name, "Nedved");
}

#[test]
fn test_select_result_out_of_range() {
    let mut pitch = editor();
    pitch.open_editor(0).unwrap();
    assert!(matches!(
        pitch.select_result(0).unwrap_err(),
        LineupError::NoSuchResult(0)
    ));
}
