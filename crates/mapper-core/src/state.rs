use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    CellContent, DoorKind, Edge, FLOOR_MAX, FLOOR_MIN, Facing, GridError, Pos,
};

/// Per-edge wall flags of a single cell. The matching flag on the neighboring
/// cell across each edge is kept equal by [`MapState::set_wall`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    #[serde(default)]
    pub n: bool,
    #[serde(default)]
    pub e: bool,
    #[serde(default)]
    pub s: bool,
    #[serde(default)]
    pub w: bool,
}

impl Walls {
    pub fn get(self, edge: Edge) -> bool {
        match edge {
            Edge::N => self.n,
            Edge::E => self.e,
            Edge::S => self.s,
            Edge::W => self.w,
        }
    }

    pub fn set(&mut self, edge: Edge, present: bool) {
        match edge {
            Edge::N => self.n = present,
            Edge::E => self.e = present,
            Edge::S => self.s = present,
            Edge::W => self.w = present,
        }
    }

    pub fn any(self) -> bool {
        self.n || self.e || self.s || self.w
    }

    /// Flags relabeled under a 90° clockwise rotation of the cell.
    pub fn rotated_cw(self) -> Walls {
        Walls { n: self.w, e: self.n, s: self.e, w: self.s }
    }
}

/// A door is an opening within a wall, not the absence of one: its edge always
/// carries a wall flag. At most one door per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub edge: Edge,
    #[serde(rename = "type")]
    pub kind: DoorKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub walls: Walls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door: Option<Door>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CellContent>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teleporter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passthrough_id: Option<String>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        !self.walls.any()
            && self.door.is_none()
            && self.content.is_none()
            && self.note.is_empty()
            && self.teleporter_id.is_none()
            && self.passthrough_id.is_none()
    }
}

static EMPTY_CELL: Cell = Cell {
    walls: Walls { n: false, e: false, s: false, w: false },
    door: None,
    content: None,
    note: String::new(),
    teleporter_id: None,
    passthrough_id: None,
};

/// One floor's cells, stored sparsely. Absent coordinates are implicitly empty
/// and are only materialized on first mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Floor {
    pub cells: BTreeMap<Pos, Cell>,
}

impl Floor {
    pub fn cell(&self, pos: Pos) -> &Cell {
        self.cells.get(&pos).unwrap_or(&EMPTY_CELL)
    }

    pub fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        self.cells.entry(pos).or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPosition {
    pub pos: Pos,
    pub facing: Facing,
}

/// The whole map: ten fixed floors, the current floor, and the single global
/// player position. This is the unit of serialization and of undo snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapState {
    pub current_floor: u8,
    pub player: PlayerPosition,
    floors: BTreeMap<u8, Floor>,
}

impl Default for MapState {
    fn default() -> Self {
        Self::new()
    }
}

impl MapState {
    /// Empty map: all floors present but blank, player at (0, 0) facing north,
    /// current floor 1.
    pub fn new() -> Self {
        let floors = (FLOOR_MIN..=FLOOR_MAX).map(|f| (f, Floor::default())).collect();
        Self {
            current_floor: FLOOR_MIN,
            player: PlayerPosition { pos: Pos::new(0, 0), facing: Facing::N },
            floors,
        }
    }

    pub fn is_valid_coord(x: i32, y: i32) -> bool {
        Pos::new(x, y).in_bounds()
    }

    pub fn is_valid_floor(floor: u8) -> bool {
        (FLOOR_MIN..=FLOOR_MAX).contains(&floor)
    }

    /// Validate a (floor, coordinate) pair without touching any cell.
    /// Mutators call this up front so a failing call has no side effect.
    pub(crate) fn check(&self, floor: u8, pos: Pos) -> Result<(), GridError> {
        if !Self::is_valid_floor(floor) {
            return Err(GridError::UnknownFloor(floor));
        }
        if !pos.in_bounds() {
            return Err(GridError::OutOfRange { x: pos.x, y: pos.y });
        }
        Ok(())
    }

    pub fn floor(&self, floor: u8) -> Result<&Floor, GridError> {
        self.floors.get(&floor).ok_or(GridError::UnknownFloor(floor))
    }

    pub fn floor_mut(&mut self, floor: u8) -> Result<&mut Floor, GridError> {
        self.floors.get_mut(&floor).ok_or(GridError::UnknownFloor(floor))
    }

    pub fn cell(&self, floor: u8, pos: Pos) -> Result<&Cell, GridError> {
        self.check(floor, pos)?;
        Ok(self.floor(floor)?.cell(pos))
    }

    pub fn cell_mut(&mut self, floor: u8, pos: Pos) -> Result<&mut Cell, GridError> {
        self.check(floor, pos)?;
        Ok(self.floor_mut(floor)?.cell_mut(pos))
    }

    /// Set one wall flag, keeping the shared edge symmetric: the in-range
    /// neighbor's opposite flag always receives the same value. Removing a
    /// wall unconditionally removes any door that depended on it, on both
    /// sides of the edge.
    pub fn set_wall(
        &mut self,
        floor: u8,
        pos: Pos,
        edge: Edge,
        present: bool,
    ) -> Result<(), GridError> {
        self.check(floor, pos)?;
        {
            let cell = self.cell_mut(floor, pos)?;
            cell.walls.set(edge, present);
            if !present && cell.door.is_some_and(|d| d.edge == edge) {
                cell.door = None;
            }
        }
        let neighbor = edge.step(pos);
        if neighbor.in_bounds() {
            let adjacent = self.cell_mut(floor, neighbor)?;
            adjacent.walls.set(edge.opposite(), present);
            if !present && adjacent.door.is_some_and(|d| d.edge == edge.opposite()) {
                adjacent.door = None;
            }
        }
        Ok(())
    }

    /// Place (`Some`) or remove (`None`) the cell's door on `edge`. Placing a
    /// door on an open edge creates the supporting wall first; a prior door on
    /// another edge of the same cell is overwritten.
    pub fn set_door(
        &mut self,
        floor: u8,
        pos: Pos,
        edge: Edge,
        kind: Option<DoorKind>,
    ) -> Result<(), GridError> {
        self.check(floor, pos)?;
        let Some(kind) = kind else {
            self.cell_mut(floor, pos)?.door = None;
            return Ok(());
        };
        if !self.cell(floor, pos)?.walls.get(edge) {
            self.set_wall(floor, pos, edge, true)?;
        }
        self.cell_mut(floor, pos)?.door = Some(Door { edge, kind });
        Ok(())
    }

    pub fn set_content(
        &mut self,
        floor: u8,
        pos: Pos,
        content: Option<CellContent>,
    ) -> Result<(), GridError> {
        self.cell_mut(floor, pos)?.content = content;
        Ok(())
    }

    pub fn set_note(&mut self, floor: u8, pos: Pos, note: String) -> Result<(), GridError> {
        self.cell_mut(floor, pos)?.note = note;
        Ok(())
    }

    pub fn set_teleporter_id(
        &mut self,
        floor: u8,
        pos: Pos,
        id: Option<String>,
    ) -> Result<(), GridError> {
        self.cell_mut(floor, pos)?.teleporter_id = id;
        Ok(())
    }

    pub fn set_passthrough_id(
        &mut self,
        floor: u8,
        pos: Pos,
        id: Option<String>,
    ) -> Result<(), GridError> {
        self.cell_mut(floor, pos)?.passthrough_id = id;
        Ok(())
    }

    pub fn set_player_position(&mut self, pos: Pos, facing: Facing) -> Result<(), GridError> {
        if !pos.in_bounds() {
            return Err(GridError::OutOfRange { x: pos.x, y: pos.y });
        }
        self.player = PlayerPosition { pos, facing };
        Ok(())
    }

    pub fn set_current_floor(&mut self, floor: u8) -> Result<(), GridError> {
        if !Self::is_valid_floor(floor) {
            return Err(GridError::UnknownFloor(floor));
        }
        self.current_floor = floor;
        Ok(())
    }

    /// Move the player one step, clamped at the grid boundary. Facing always
    /// updates to the travel direction, even when the step is clamped.
    pub fn move_player(&mut self, direction: Facing) {
        let next = direction.as_edge().step(self.player.pos);
        if next.in_bounds() {
            self.player.pos = next;
        }
        self.player.facing = direction;
    }

    /// Replace the floor's cell mapping wholesale with an empty one.
    pub fn clear_floor(&mut self, floor: u8) -> Result<(), GridError> {
        *self.floor_mut(floor)? = Floor::default();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        *self = Self::new();
    }
}
