use egui::{Pos2, pos2, vec2};
use polyline_paint::command::{Command, CommandError, CommandHistory};
use polyline_paint::document::Document;
use polyline_paint::path::{DrawingStatus, PathId, PolylineType};

// Helper to draw a path through the command history, the way the input
// layer does it: first click creates the group, later clicks append.
fn draw_path(history: &mut CommandHistory, document: &mut Document, points: &[Pos2]) -> PathId {
    let (first, rest) = points.split_first().expect("need at least one point");
    history
        .execute(Command::CreateGroup { point: *first }, document)
        .unwrap();
    for point in rest {
        history
            .execute(Command::AddPoint { point: *point }, document)
            .unwrap();
    }
    document.active_id().unwrap()
}

#[test]
fn fresh_history_has_nothing_to_undo_or_redo() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let state = history.state(&document);
    assert_eq!(state.position, 0);
    assert_eq!(state.history_len, 1);
    assert_eq!(state.active_id, None);
    assert!(!history.can_undo());
    assert!(!history.can_redo());

    // Undo/redo on a fresh history are safe no-ops
    history.undo(&mut document);
    history.redo(&mut document);
    assert_eq!(history.state(&document).position, 0);
}

#[test]
fn create_and_add_points_undo_back_to_empty() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let id = draw_path(
        &mut history,
        &mut document,
        &[pos2(10.0, 10.0), pos2(20.0, 20.0)],
    );
    assert_eq!(document.points_of(id), &[pos2(10.0, 10.0), pos2(20.0, 20.0)]);
    assert_eq!(document.drawing_status_of(id), DrawingStatus::Drawing);

    history.undo(&mut document);
    assert_eq!(document.points_of(id), &[pos2(10.0, 10.0)]);

    // Creation seeded the first point, so the state after all undos is the
    // empty document, never a path with no points
    history.undo(&mut document);
    assert!(document.path(id).is_none());
    assert_eq!(document.active_id(), None);
    assert!(document.is_empty());
    assert!(!history.can_undo());

    history.redo(&mut document);
    history.redo(&mut document);
    assert_eq!(document.points_of(id), &[pos2(10.0, 10.0), pos2(20.0, 20.0)]);
    assert_eq!(document.active_id(), Some(id));
}

#[test]
fn finish_polyline_undo_reopens_drawing() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let id = draw_path(
        &mut history,
        &mut document,
        &[pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0)],
    );

    history
        .execute(
            Command::FinishPolyline {
                drawing_status: DrawingStatus::NotDrawing,
                polyline_type: PolylineType::Closed,
            },
            &mut document,
        )
        .unwrap();
    assert_eq!(document.polyline_type_of(id), PolylineType::Closed);
    assert_eq!(document.drawing_status_of(id), DrawingStatus::NotDrawing);

    history.undo(&mut document);
    assert_eq!(document.polyline_type_of(id), PolylineType::Open);
    assert_eq!(document.drawing_status_of(id), DrawingStatus::Drawing);

    history.redo(&mut document);
    assert_eq!(document.polyline_type_of(id), PolylineType::Closed);
    assert_eq!(document.drawing_status_of(id), DrawingStatus::NotDrawing);
}

#[test]
fn translate_undo_is_exact() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let id = draw_path(&mut history, &mut document, &[pos2(0.0, 0.0), pos2(10.0, 10.0)]);

    history
        .execute(Command::TranslateGroup { delta: vec2(5.0, -5.0) }, &mut document)
        .unwrap();
    assert_eq!(document.points_of(id), &[pos2(5.0, -5.0), pos2(15.0, 5.0)]);

    history.undo(&mut document);
    assert_eq!(document.points_of(id), &[pos2(0.0, 0.0), pos2(10.0, 10.0)]);
}

#[test]
fn move_point_undo_restores_point_list() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let id = draw_path(
        &mut history,
        &mut document,
        &[pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 0.0)],
    );

    history
        .execute(
            Command::MovePoint {
                index: 1,
                point: pos2(10.0, 30.0),
            },
            &mut document,
        )
        .unwrap();
    assert_eq!(
        document.points_of(id),
        &[pos2(0.0, 0.0), pos2(10.0, 30.0), pos2(20.0, 0.0)]
    );

    history.undo(&mut document);
    assert_eq!(
        document.points_of(id),
        &[pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 0.0)]
    );
}

#[test]
fn delete_path_undo_restores_everything() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let id = draw_path(&mut history, &mut document, &[pos2(1.0, 2.0), pos2(3.0, 4.0)]);
    history
        .execute(
            Command::FinishPolyline {
                drawing_status: DrawingStatus::NotDrawing,
                polyline_type: PolylineType::Open,
            },
            &mut document,
        )
        .unwrap();

    history
        .execute(Command::DeletePath { id }, &mut document)
        .unwrap();
    assert!(document.path(id).is_none());
    assert_eq!(document.active_id(), None);

    history.undo(&mut document);
    let path = document.path(id).expect("path restored under the same id");
    assert_eq!(path.points(), &[pos2(1.0, 2.0), pos2(3.0, 4.0)]);
    assert_eq!(path.drawing_status(), DrawingStatus::NotDrawing);
    assert_eq!(path.polyline_type(), PolylineType::Open);
    assert_eq!(document.active_id(), Some(id));
}

#[test]
fn clear_canvas_undo_restores_all_paths() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let first = draw_path(&mut history, &mut document, &[pos2(0.0, 0.0), pos2(5.0, 5.0)]);
    let second = draw_path(&mut history, &mut document, &[pos2(50.0, 50.0)]);
    assert_eq!(document.len(), 2);
    assert_eq!(document.active_id(), Some(second));

    history.execute(Command::ClearCanvas, &mut document).unwrap();
    assert!(document.is_empty());
    assert_eq!(document.active_id(), None);

    history.undo(&mut document);
    assert_eq!(document.len(), 2);
    assert_eq!(document.points_of(first), &[pos2(0.0, 0.0), pos2(5.0, 5.0)]);
    assert_eq!(document.points_of(second), &[pos2(50.0, 50.0)]);
    assert_eq!(document.active_id(), Some(second));
}

#[test]
fn set_active_undo_restores_previous_selection() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let first = draw_path(&mut history, &mut document, &[pos2(0.0, 0.0)]);
    let second = draw_path(&mut history, &mut document, &[pos2(10.0, 10.0)]);
    assert_eq!(document.active_id(), Some(second));

    history
        .execute(Command::SetActive { id: Some(first) }, &mut document)
        .unwrap();
    assert_eq!(document.active_id(), Some(first));

    history
        .execute(Command::SetActive { id: None }, &mut document)
        .unwrap();
    assert_eq!(document.active_id(), None);

    history.undo(&mut document);
    assert_eq!(document.active_id(), Some(first));
    history.undo(&mut document);
    assert_eq!(document.active_id(), Some(second));
}

#[test]
fn new_command_after_undo_prunes_redo_branch() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let id = draw_path(
        &mut history,
        &mut document,
        &[pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 0.0)],
    );
    assert_eq!(history.state(&document).position, 3);

    history.undo(&mut document);
    history.undo(&mut document);
    assert_eq!(history.state(&document).position, 1);
    assert!(history.can_redo());

    history
        .execute(Command::AddPoint { point: pos2(99.0, 99.0) }, &mut document)
        .unwrap();
    let state = history.state(&document);
    assert_eq!(state.position, 2);
    assert_eq!(state.history_len, 3);
    assert!(!history.can_redo());
    assert_eq!(document.points_of(id), &[pos2(0.0, 0.0), pos2(99.0, 99.0)]);

    // The pruned branch is unreachable: redo is a no-op now
    history.redo(&mut document);
    assert_eq!(document.points_of(id), &[pos2(0.0, 0.0), pos2(99.0, 99.0)]);
    assert_eq!(history.state(&document).position, 2);
}

#[test]
fn history_length_grows_only_on_new_commands() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    draw_path(&mut history, &mut document, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    let len_after_draw = history.state(&document).history_len;
    assert_eq!(len_after_draw, 3);

    history.undo(&mut document);
    history.redo(&mut document);
    history.undo(&mut document);
    assert_eq!(history.state(&document).history_len, len_after_draw);

    history
        .execute(Command::AddPoint { point: pos2(2.0, 2.0) }, &mut document)
        .unwrap();
    // One undone entry was pruned, the new command took its place
    assert_eq!(history.state(&document).history_len, len_after_draw);

    history
        .execute(Command::AddPoint { point: pos2(3.0, 3.0) }, &mut document)
        .unwrap();
    assert_eq!(history.state(&document).history_len, len_after_draw + 1);
}

#[test]
fn undo_redo_enablement_boundary() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    draw_path(&mut history, &mut document, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    let state = history.state(&document);
    assert_eq!(state.position, state.history_len - 1);
    assert!(history.can_undo());
    assert!(!history.can_redo());

    history.undo(&mut document);
    history.undo(&mut document);
    let state = history.state(&document);
    assert_eq!(state.position, 0);
    assert!(!history.can_undo());
    assert!(history.can_redo());
}

#[test]
fn failed_commands_record_nothing() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    // No active path yet
    let err = history
        .execute(Command::AddPoint { point: pos2(1.0, 1.0) }, &mut document)
        .unwrap_err();
    assert_eq!(err, CommandError::NoActivePath);
    assert_eq!(err.to_string(), "no active path");

    let err = history
        .execute(Command::TranslateGroup { delta: vec2(1.0, 1.0) }, &mut document)
        .unwrap_err();
    assert_eq!(err, CommandError::NoActivePath);

    let unknown = PathId::new();
    let err = history
        .execute(Command::DeletePath { id: unknown }, &mut document)
        .unwrap_err();
    assert_eq!(err, CommandError::PathNotFound(unknown));

    let err = history
        .execute(Command::SetActive { id: Some(unknown) }, &mut document)
        .unwrap_err();
    assert_eq!(err, CommandError::PathNotFound(unknown));

    let state = history.state(&document);
    assert_eq!(state.position, 0);
    assert_eq!(state.history_len, 1);
    assert!(document.is_empty());

    // Bad point index on an existing path
    let id = draw_path(&mut history, &mut document, &[pos2(0.0, 0.0)]);
    let err = history
        .execute(
            Command::MovePoint {
                index: 5,
                point: pos2(1.0, 1.0),
            },
            &mut document,
        )
        .unwrap_err();
    assert_eq!(err, CommandError::PointOutOfBounds { index: 5, len: 1 });
    assert_eq!(document.points_of(id), &[pos2(0.0, 0.0)]);
    assert_eq!(history.state(&document).position, 1);
}

#[test]
fn redo_replays_against_the_bound_path() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    let first = draw_path(&mut history, &mut document, &[pos2(0.0, 0.0)]);
    history
        .execute(Command::AddPoint { point: pos2(5.0, 5.0) }, &mut document)
        .unwrap();
    let second = draw_path(&mut history, &mut document, &[pos2(100.0, 100.0)]);
    assert_ne!(first, second);

    // Walk all the way back, then replay the whole session
    while history.can_undo() {
        history.undo(&mut document);
    }
    assert!(document.is_empty());
    while history.can_redo() {
        history.redo(&mut document);
    }

    assert_eq!(document.points_of(first), &[pos2(0.0, 0.0), pos2(5.0, 5.0)]);
    assert_eq!(document.points_of(second), &[pos2(100.0, 100.0)]);
    assert_eq!(document.active_id(), Some(second));
}

#[test]
fn history_labels_follow_applied_commands() {
    let mut document = Document::new();
    let mut history = CommandHistory::new();

    draw_path(&mut history, &mut document, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    history.execute(Command::ClearCanvas, &mut document).unwrap();

    let labels: Vec<_> = history.labels().collect();
    assert_eq!(labels, vec!["Create Group", "Add Point", "Clear Canvas"]);
}
