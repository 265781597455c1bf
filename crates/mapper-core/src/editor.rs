//! The editing session: a [`MapState`] plus its undo/redo history.
//!
//! Every structural mutation records a pre-image snapshot before applying, so
//! one user action is one undo step. Arguments are validated first; a failing
//! call records nothing and changes nothing. Player position, current floor,
//! and the correlation ids mutate without history, and the flood fill is a
//! derive operation outside history as well.

use crate::explore;
use crate::history::History;
use crate::map_file::{self, DocumentError};
use crate::pathfinding::{self, Step};
use crate::rotate;
use crate::state::{Cell, MapState};
use crate::types::{CellContent, DoorKind, Edge, Facing, GridError, Pos};

#[derive(Debug, Default)]
pub struct Editor {
    state: MapState,
    history: History,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: MapState) -> Self {
        Self { state, history: History::default() }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn cell(&self, floor: u8, pos: Pos) -> Result<&Cell, GridError> {
        self.state.cell(floor, pos)
    }

    // -- history-recorded mutations --

    pub fn set_wall(
        &mut self,
        floor: u8,
        pos: Pos,
        edge: Edge,
        present: bool,
    ) -> Result<(), GridError> {
        self.state.check(floor, pos)?;
        self.history.record(self.state.clone());
        self.state.set_wall(floor, pos, edge, present)
    }

    pub fn set_door(
        &mut self,
        floor: u8,
        pos: Pos,
        edge: Edge,
        kind: Option<DoorKind>,
    ) -> Result<(), GridError> {
        self.state.check(floor, pos)?;
        self.history.record(self.state.clone());
        self.state.set_door(floor, pos, edge, kind)
    }

    pub fn set_content(
        &mut self,
        floor: u8,
        pos: Pos,
        content: Option<CellContent>,
    ) -> Result<(), GridError> {
        self.state.check(floor, pos)?;
        self.history.record(self.state.clone());
        self.state.set_content(floor, pos, content)
    }

    pub fn set_note(&mut self, floor: u8, pos: Pos, note: String) -> Result<(), GridError> {
        self.state.check(floor, pos)?;
        self.history.record(self.state.clone());
        self.state.set_note(floor, pos, note)
    }

    pub fn clear_floor(&mut self, floor: u8) -> Result<(), GridError> {
        if !MapState::is_valid_floor(floor) {
            return Err(GridError::UnknownFloor(floor));
        }
        self.history.record(self.state.clone());
        self.state.clear_floor(floor)
    }

    pub fn clear_all(&mut self) {
        self.history.record(self.state.clone());
        self.state.clear_all();
    }

    pub fn rotate_floor_90(&mut self, floor: u8) -> Result<(), GridError> {
        if !MapState::is_valid_floor(floor) {
            return Err(GridError::UnknownFloor(floor));
        }
        self.history.record(self.state.clone());
        rotate::rotate_floor_90(&mut self.state, floor)
    }

    // -- un-historied mutations --

    pub fn set_player_position(&mut self, pos: Pos, facing: Facing) -> Result<(), GridError> {
        self.state.set_player_position(pos, facing)
    }

    pub fn set_current_floor(&mut self, floor: u8) -> Result<(), GridError> {
        self.state.set_current_floor(floor)
    }

    pub fn move_player(&mut self, direction: Facing) {
        self.state.move_player(direction);
    }

    pub fn set_teleporter_id(
        &mut self,
        floor: u8,
        pos: Pos,
        id: Option<String>,
    ) -> Result<(), GridError> {
        self.state.set_teleporter_id(floor, pos, id)
    }

    pub fn set_passthrough_id(
        &mut self,
        floor: u8,
        pos: Pos,
        id: Option<String>,
    ) -> Result<(), GridError> {
        self.state.set_passthrough_id(floor, pos, id)
    }

    // -- undo/redo --

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.state)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.state)
    }

    // -- derive operations --

    pub fn find_path(
        &self,
        floor: u8,
        start: Pos,
        goal: Pos,
    ) -> Result<Option<Vec<Pos>>, GridError> {
        pathfinding::find_path(&self.state, floor, start, goal)
    }

    pub fn path_to_directions(
        &self,
        floor: u8,
        path: &[Pos],
        start_facing: Facing,
    ) -> Result<Vec<Step>, GridError> {
        Ok(pathfinding::path_to_directions(self.state.floor(floor)?, path, start_facing))
    }

    /// Mutates the grid but is not an undoable action.
    pub fn flood_fill_explored(&mut self, floor: u8, start: Pos) -> Result<(), GridError> {
        explore::flood_fill_explored(&mut self.state, floor, start)
    }

    // -- document exchange --

    pub fn export_json(&self) -> String {
        map_file::export_json(&self.state)
    }

    /// Replace the map wholesale with an imported document. The history is
    /// left as it was: the import itself is not an undo step.
    pub fn import_json(&mut self, text: &str) -> Result<(), DocumentError> {
        self.state = map_file::import_json(text)?;
        Ok(())
    }
}
