use mapper_core::{
    CellContent, DoorKind, Edge, Editor, Facing, GridError, Instruction, Pos,
};

#[test]
fn a_full_editing_session_undoes_and_redoes_cleanly() {
    let mut editor = Editor::new();
    let blank = editor.state().clone();

    editor.set_wall(1, Pos::new(3, 3), Edge::N, true).unwrap();
    let after_wall = editor.state().clone();
    editor.set_door(1, Pos::new(3, 3), Edge::N, Some(DoorKind::Locked)).unwrap();
    let after_door = editor.state().clone();
    editor.set_content(1, Pos::new(3, 3), Some(CellContent::Spinner)).unwrap();

    assert!(editor.undo());
    assert_eq!(editor.state(), &after_door);
    assert!(editor.undo());
    assert_eq!(editor.state(), &after_wall);
    assert!(editor.undo());
    assert_eq!(editor.state(), &blank);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert_eq!(editor.state(), &after_wall);
    assert!(editor.redo());
    assert_eq!(editor.state(), &after_door);
}

#[test]
fn a_new_mutation_after_undo_invalidates_redo() {
    let mut editor = Editor::new();
    editor.set_wall(1, Pos::new(3, 3), Edge::N, true).unwrap();
    editor.undo();
    editor.set_wall(1, Pos::new(4, 4), Edge::E, true).unwrap();
    assert!(!editor.redo());
}

#[test]
fn placing_a_door_is_one_undo_step_even_when_it_creates_the_wall() {
    let mut editor = Editor::new();
    let blank = editor.state().clone();

    editor.set_door(1, Pos::new(6, 6), Edge::W, Some(DoorKind::Normal)).unwrap();
    assert!(editor.cell(1, Pos::new(6, 6)).unwrap().walls.w);

    assert!(editor.undo());
    assert_eq!(editor.state(), &blank);
}

#[test]
fn failed_mutations_record_nothing() {
    let mut editor = Editor::new();
    editor.set_wall(1, Pos::new(3, 3), Edge::N, true).unwrap();
    let after_wall = editor.state().clone();

    assert_eq!(
        editor.set_wall(1, Pos::new(3, 99), Edge::N, true),
        Err(GridError::OutOfRange { x: 3, y: 99 })
    );
    assert_eq!(editor.set_note(42, Pos::new(0, 0), "x".into()), Err(GridError::UnknownFloor(42)));
    assert_eq!(editor.state(), &after_wall);

    // One undo lands on the blank map: the failures never became undo steps.
    assert!(editor.undo());
    assert!(!editor.undo());
}

#[test]
fn player_and_floor_changes_are_not_undo_steps() {
    let mut editor = Editor::new();
    editor.set_player_position(Pos::new(8, 8), Facing::S).unwrap();
    editor.set_current_floor(4).unwrap();
    editor.move_player(Facing::E);
    assert_eq!(editor.state().player.pos, Pos::new(9, 8));
    assert!(!editor.undo());
}

#[test]
fn clear_floor_and_clear_all_are_undoable() {
    let mut editor = Editor::new();
    editor.set_wall(2, Pos::new(1, 1), Edge::N, true).unwrap();
    let populated = editor.state().clone();

    editor.clear_floor(2).unwrap();
    assert!(editor.state().floor(2).unwrap().cells.is_empty());
    assert!(editor.undo());
    assert_eq!(editor.state(), &populated);

    editor.clear_all();
    assert_eq!(editor.state().current_floor, 1);
    assert!(editor.undo());
    assert_eq!(editor.state(), &populated);
}

#[test]
fn routing_through_a_door_yields_open_door_instructions() {
    let mut editor = Editor::new();
    // Wall across the second column with a single locked door at y=0.
    for y in 0..20 {
        editor.set_wall(1, Pos::new(0, y), Edge::E, true).unwrap();
    }
    editor.set_door(1, Pos::new(0, 0), Edge::E, Some(DoorKind::Locked)).unwrap();

    let path = editor
        .find_path(1, Pos::new(0, 5), Pos::new(1, 5))
        .unwrap()
        .expect("the door keeps the halves connected");
    assert_eq!(path.first(), Some(&Pos::new(0, 5)));
    assert_eq!(path.last(), Some(&Pos::new(1, 5)));
    // Down to the door row, through the door, back up.
    assert_eq!(path.len(), 12);

    let steps = editor.path_to_directions(1, &path, Facing::N).unwrap();
    assert!(steps.iter().any(|s| s.instruction == Instruction::OpenDoor));
}

#[test]
fn flood_fill_is_not_an_undo_step() {
    let mut editor = Editor::new();
    editor.set_wall(1, Pos::new(0, 0), Edge::N, true).unwrap();
    editor.flood_fill_explored(1, Pos::new(5, 5)).unwrap();
    assert_eq!(
        editor.cell(1, Pos::new(5, 5)).unwrap().content,
        Some(CellContent::Explored)
    );

    // The single undo step is the wall, not the fill.
    assert!(editor.undo());
    assert!(!editor.undo());
}

#[test]
fn import_replaces_the_state_wholesale() {
    let mut editor = Editor::new();
    editor.set_wall(1, Pos::new(3, 3), Edge::N, true).unwrap();
    editor.set_current_floor(5).unwrap();
    let exported = editor.export_json();

    let mut other = Editor::new();
    other.set_content(2, Pos::new(0, 0), Some(CellContent::Pit)).unwrap();
    other.import_json(&exported).unwrap();
    assert_eq!(other.state(), editor.state());

    assert!(other.import_json("{\"floors\": null}").is_err());
    // The failed import changed nothing.
    assert_eq!(other.state(), editor.state());
}

#[test]
fn rotation_is_undoable_like_any_other_edit() {
    let mut editor = Editor::new();
    editor.set_door(1, Pos::new(5, 5), Edge::N, Some(DoorKind::Teleporter)).unwrap();
    let before = editor.state().clone();

    editor.rotate_floor_90(1).unwrap();
    assert_ne!(editor.state(), &before);
    assert!(editor.undo());
    assert_eq!(editor.state(), &before);
}
