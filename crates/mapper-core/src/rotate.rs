//! 90° clockwise rotation of a floor's entire geometry.

use std::collections::BTreeMap;
use std::mem;

use crate::state::{Cell, Door, Floor, MapState};
use crate::types::{GRID_SIZE, GridError, Pos};

/// Rebuild the floor's cell mapping under a 90° clockwise rotation:
/// `(x, y) → (GRID_SIZE-1 − y, x)`, with every wall set and door edge
/// relabeled n→e→s→w→n. Cells that were never materialized stay absent. When
/// the rotated floor is the current one, the player position and facing
/// rotate with it.
pub fn rotate_floor_90(state: &mut MapState, floor: u8) -> Result<(), GridError> {
    let target = state.floor_mut(floor)?;
    let old = mem::take(&mut target.cells);

    let mut rotated = BTreeMap::new();
    for (pos, cell) in old {
        rotated.insert(rotate_pos(pos), rotate_cell(cell));
    }
    *target = Floor { cells: rotated };

    if state.current_floor == floor {
        state.player.pos = rotate_pos(state.player.pos);
        state.player.facing = state.player.facing.rotated_cw();
    }
    Ok(())
}

fn rotate_pos(pos: Pos) -> Pos {
    Pos { x: GRID_SIZE - 1 - pos.y, y: pos.x }
}

fn rotate_cell(cell: Cell) -> Cell {
    Cell {
        walls: cell.walls.rotated_cw(),
        door: cell.door.map(|d| Door { edge: d.edge.rotated_cw(), kind: d.kind }),
        ..cell
    }
}
