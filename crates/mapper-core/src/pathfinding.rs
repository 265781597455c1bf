//! Shortest-path routing over a floor's wall graph, and translation of a
//! route into facing-relative movement instructions.
//!
//! Doors are conditional edge-unlocks: a door recorded on either side of a
//! shared edge permits passage even though the edge is walled. This module
//! never mutates the map.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use crate::state::{Floor, MapState};
use crate::types::{Edge, Facing, GridError, Pos};

/// Breadth-first shortest path from `start` to `goal`, inclusive of both
/// endpoints. Returns `Ok(None)` when the goal is unreachable; a start equal
/// to the goal yields a single-element path, so the two cases stay distinct.
pub fn find_path(
    state: &MapState,
    floor: u8,
    start: Pos,
    goal: Pos,
) -> Result<Option<Vec<Pos>>, GridError> {
    state.check(floor, start)?;
    state.check(floor, goal)?;
    let floor = state.floor(floor)?;

    let mut visited = BTreeSet::new();
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    // FIFO frontier: the first dequeue of the goal carries a minimal path.
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Ok(Some(reconstruct_path(&came_from, start, goal)));
        }
        for edge in Edge::ALL {
            let next = edge.step(current);
            if !next.in_bounds() {
                continue;
            }
            if !edge_passable(floor, current, edge) {
                continue;
            }
            if visited.insert(next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    Ok(None)
}

/// Whether a route may cross from `pos` over `edge`. Blocked exactly when a
/// wall flag is set on either side of the shared edge and neither side
/// records a door for it.
fn edge_passable(floor: &Floor, pos: Pos, edge: Edge) -> bool {
    let neighbor = edge.step(pos);
    let here = floor.cell(pos);
    let there = floor.cell(neighbor);
    let walled = here.walls.get(edge) || there.walls.get(edge.opposite());
    if !walled {
        return true;
    }
    here.door.is_some_and(|d| d.edge == edge)
        || there.door.is_some_and(|d| d.edge == edge.opposite())
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut pos = goal;
    let mut path = vec![pos];
    while pos != start {
        pos = *came_from.get(&pos).expect("path must be reconstructible");
        path.push(pos);
    }
    path.reverse();
    path
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    TurnLeft,
    TurnRight,
    OpenDoor,
    Forward,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Instruction::TurnLeft => "turn-left",
            Instruction::TurnRight => "turn-right",
            Instruction::OpenDoor => "open-door",
            Instruction::Forward => "forward",
        };
        f.write_str(s)
    }
}

/// A run of identical instructions, e.g. `3xforward`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub count: u32,
    pub instruction: Instruction,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.instruction)
        } else {
            write!(f, "{}x{}", self.count, self.instruction)
        }
    }
}

/// Translate a path into turn/forward instructions relative to `start_facing`,
/// then run-length-compress consecutive identical instructions.
///
/// Turns are emitted clockwise-first: one right turn per clockwise quarter
/// when the target direction is 1 or 2 quarters away, and a single left turn
/// when it is 3. An about-face therefore always compiles to two right turns.
/// When the departed cell records a door on the crossed edge, `open-door`
/// precedes the `forward`.
pub fn path_to_directions(floor: &Floor, path: &[Pos], start_facing: Facing) -> Vec<Step> {
    let mut raw = Vec::new();
    let mut facing = start_facing;

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let travel =
            Facing::from_delta(from, to).expect("path steps must be grid-adjacent");
        match facing.quarter_turns_cw(travel) {
            0 => {}
            1 => raw.push(Instruction::TurnRight),
            2 => {
                raw.push(Instruction::TurnRight);
                raw.push(Instruction::TurnRight);
            }
            _ => raw.push(Instruction::TurnLeft),
        }
        if floor.cell(from).door.is_some_and(|d| d.edge == travel.as_edge()) {
            raw.push(Instruction::OpenDoor);
        }
        raw.push(Instruction::Forward);
        facing = travel;
    }

    compress(&raw)
}

fn compress(raw: &[Instruction]) -> Vec<Step> {
    let mut steps: Vec<Step> = Vec::new();
    for &instruction in raw {
        match steps.last_mut() {
            Some(step) if step.instruction == instruction => step.count += 1,
            _ => steps.push(Step { count: 1, instruction }),
        }
    }
    steps
}
