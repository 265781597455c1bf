//! Wall-bounded reachability flood: marks every cell reachable from a seed
//! as explored. Unlike routing, doors are irrelevant here — a walled edge is
//! closed no matter what is recorded on it.

use std::collections::{BTreeSet, VecDeque};

use crate::state::{Floor, MapState};
use crate::types::{CellContent, Edge, GridError, Pos};

/// Flood outward from `start`, marking reachable cells with the explored tag.
///
/// Rules per cell: darkness is fully opaque — it stays visited but is neither
/// marked nor propagated through; an empty cell or one already tagged
/// explored is (re)marked explored; any other content is left as-is while the
/// flood still passes through its open edges. Propagation crosses an edge
/// only when no wall flag is set on either side of it.
pub fn flood_fill_explored(
    state: &mut MapState,
    floor: u8,
    start: Pos,
) -> Result<(), GridError> {
    state.check(floor, start)?;
    let floor = state.floor_mut(floor)?;

    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let content = floor.cell(current).content;
        match content {
            Some(CellContent::Darkness) => continue,
            None | Some(CellContent::Explored) => {
                floor.cell_mut(current).content = Some(CellContent::Explored);
            }
            Some(_) => {}
        }
        for edge in Edge::ALL {
            let next = edge.step(current);
            if !next.in_bounds() {
                continue;
            }
            if walled(floor, current, edge) {
                continue;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(())
}

fn walled(floor: &Floor, pos: Pos, edge: Edge) -> bool {
    floor.cell(pos).walls.get(edge) || floor.cell(edge.step(pos)).walls.get(edge.opposite())
}
